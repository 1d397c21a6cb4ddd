use {
    clap::Args,
    std::time::Duration,
};

pub const DEFAULT_CLOSURE_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Auction Closure Options")]
#[group(id = "AuctionClosure")]
pub struct Options {
    /// How long an auction stays open before it is completed automatically (e.g. `500ms`,
    /// `10s`, `1m 30s`). Missing or unparsable values fall back to 10 seconds.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    pub auction_interval: Option<String>,
}

impl Options {
    pub fn closure_interval(&self) -> Duration {
        resolve_closure_interval(self.auction_interval.as_deref())
    }
}

/// Never fails: anything that does not parse as a duration resolves to the default.
pub fn resolve_closure_interval(auction_interval: Option<&str>) -> Duration {
    match auction_interval.map(|interval| humantime::parse_duration(interval.trim())) {
        Some(Ok(interval)) => interval,
        _ => {
            tracing::info!(
                auction_interval = ?auction_interval,
                "Invalid or missing auction interval, defaulting to {}",
                humantime::format_duration(DEFAULT_CLOSURE_INTERVAL)
            );
            DEFAULT_CLOSURE_INTERVAL
        }
    }
}
