use {
    super::Service,
    crate::{
        auction::entities,
        kernel::error::ServiceError,
    },
};

#[derive(Clone, Debug, Default)]
pub struct GetAuctionsInput {
    pub status:       Option<entities::AuctionStatus>,
    pub category:     Option<String>,
    /// Case-insensitive substring of the product name.
    pub product_name: Option<String>,
}

impl Service {
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Vec<entities::Auction>, ServiceError> {
        self.repo
            .get_auctions(input.status, input.category, input.product_name)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to get auctions");
                ServiceError::TemporarilyUnavailable
            })
    }
}
