use {
    super::Service,
    crate::auction::entities,
};

pub struct CloseAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Completes the auction. Failures are logged and left for external reconciliation.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn close_auction(&self, input: CloseAuctionInput) {
        tracing::Span::current().record("auction_id", input.auction_id.to_string());
        match self
            .repo
            .update_auction_status(input.auction_id, entities::AuctionStatus::Completed)
            .await
        {
            Ok(true) => tracing::debug!("Auction completed"),
            // Already completed or no longer stored.
            Ok(false) => tracing::debug!("Auction closure had no effect"),
            Err(e) => tracing::error!(error = ?e, "Failed to update auction status"),
        }
    }
}
