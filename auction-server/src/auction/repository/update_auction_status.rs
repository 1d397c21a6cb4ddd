use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        new_status: entities::AuctionStatus,
    ) -> anyhow::Result<bool> {
        self.db.update_auction_status(auction_id, new_status).await
    }
}
