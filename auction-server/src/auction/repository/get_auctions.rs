use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
        category: Option<String>,
        product_name: Option<String>,
    ) -> anyhow::Result<Vec<entities::Auction>> {
        self.db.get_auctions(status, category, product_name).await
    }
}
