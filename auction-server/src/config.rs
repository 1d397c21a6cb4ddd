use {
    crate::auction::entities,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
};

pub mod auction;
pub mod server;

// `Options` is the command-line interface of the server, one variant per subcommand.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Create an auction and wait until its automatic closure has been resolved.
    Create(CreateOptions),
    /// List stored auctions.
    List(ListOptions),
}

#[derive(Args, Clone, Debug)]
pub struct CreateOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub auction: auction::Options,

    #[command(flatten)]
    pub auction_create: AuctionCreateOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct AuctionCreateOptions {
    /// Name of the product being auctioned.
    #[arg(long = "product-name")]
    pub product_name: String,
    #[arg(long = "category")]
    pub category:     String,
    #[arg(long = "description")]
    pub description:  String,
    /// One of `new`, `used` or `refurbished`.
    #[arg(long = "condition")]
    #[arg(default_value = "new")]
    pub condition:    entities::ProductCondition,
}

impl From<AuctionCreateOptions> for entities::AuctionCreate {
    fn from(options: AuctionCreateOptions) -> Self {
        Self {
            product_name: options.product_name,
            category:     options.category,
            description:  options.description,
            condition:    options.condition,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct ListOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    /// Only list auctions in this status (`pending`, `open` or `completed`).
    #[arg(long = "status")]
    pub status:       Option<entities::AuctionStatus>,
    #[arg(long = "category")]
    pub category:     Option<String>,
    /// Case-insensitive substring of the product name.
    #[arg(long = "product-name")]
    pub product_name: Option<String>,
}
