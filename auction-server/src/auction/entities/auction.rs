use {
    serde::Serialize,
    strum::{
        Display,
        EnumString,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type AuctionId = Uuid;

const MIN_PRODUCT_NAME_LEN: usize = 2;
const MIN_CATEGORY_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 11;

/// Declaration order is the lifecycle order. Once `Completed`, an auction never moves back.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuctionStatus {
    Pending,
    Open,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
}

impl AuctionCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.product_name.trim().chars().count() < MIN_PRODUCT_NAME_LEN {
            return Err(format!(
                "product name must be at least {} characters long",
                MIN_PRODUCT_NAME_LEN
            ));
        }
        if self.category.trim().chars().count() < MIN_CATEGORY_LEN {
            return Err(format!(
                "category must be at least {} characters long",
                MIN_CATEGORY_LEN
            ));
        }
        if self.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            return Err(format!(
                "description must be at least {} characters long",
                MIN_DESCRIPTION_LEN
            ));
        }
        Ok(())
    }
}

impl Auction {
    pub fn new(auction_create: AuctionCreate) -> Self {
        Self {
            id:            Uuid::new_v4(),
            product_name:  auction_create.product_name,
            category:      auction_create.category,
            description:   auction_create.description,
            condition:     auction_create.condition,
            status:        AuctionStatus::Open,
            creation_time: OffsetDateTime::now_utc(),
        }
    }
}
