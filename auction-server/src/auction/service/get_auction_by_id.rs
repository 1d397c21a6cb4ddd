use {
    super::Service,
    crate::{
        auction::entities,
        kernel::error::ServiceError,
    },
};

pub struct GetAuctionByIdInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    pub async fn get_auction_by_id(
        &self,
        input: GetAuctionByIdInput,
    ) -> Result<entities::Auction, ServiceError> {
        self.repo
            .get_auction(input.auction_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    auction_id = %input.auction_id,
                    "Failed to get auction"
                );
                ServiceError::TemporarilyUnavailable
            })?
            .ok_or(ServiceError::AuctionNotFound)
    }
}
