#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::kernel::db::DB,
    async_trait::async_trait,
    sqlx::{
        FromRow,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::{
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Pending,
    Open,
    Completed,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Pending => AuctionStatus::Pending,
            entities::AuctionStatus::Open => AuctionStatus::Open,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Pending => entities::AuctionStatus::Pending,
            AuctionStatus::Open => entities::AuctionStatus::Open,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:            entities::AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: PrimitiveDateTime,
}

impl Auction {
    pub fn get_auction_entity(self) -> entities::Auction {
        entities::Auction {
            id:            self.id,
            product_name:  self.product_name,
            category:      self.category,
            description:   self.description,
            condition:     self.condition.into(),
            status:        self.status.into(),
            creation_time: self.creation_time.assume_offset(UtcOffset::UTC),
        }
    }
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        let creation_time = auction.creation_time.to_offset(UtcOffset::UTC);
        Self {
            id:            auction.id,
            product_name:  auction.product_name.clone(),
            category:      auction.category.clone(),
            description:   auction.description.clone(),
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: PrimitiveDateTime::new(creation_time.date(), creation_time.time()),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()>;
    /// Moves the auction forward to `new_status`. Returns `false` when the auction is missing
    /// or already at (or past) `new_status`.
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        new_status: entities::AuctionStatus,
    ) -> anyhow::Result<bool>;
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>>;
    async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
        category: Option<String>,
        product_name: Option<String>,
    ) -> anyhow::Result<Vec<entities::Auction>>;
}

#[async_trait]
impl Database for DB {
    #[instrument(name = "db_add_auction", fields(result = "success"), skip_all)]
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        let auction = Auction::from(auction);
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, condition, status, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(auction.id)
        .bind(auction.product_name)
        .bind(auction.category)
        .bind(auction.description)
        .bind(auction.condition)
        .bind(auction.status)
        .bind(auction.creation_time)
        .execute(self)
        .await
        .inspect_err(|_| {
            tracing::Span::current().record("result", "error");
        })?;
        Ok(())
    }

    #[instrument(name = "db_update_auction_status", fields(result = "success"), skip_all)]
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        new_status: entities::AuctionStatus,
    ) -> anyhow::Result<bool> {
        // Enum comparison follows declaration order, so the status can only move forward.
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2 AND status < $1")
            .bind(AuctionStatus::from(new_status))
            .bind(auction_id)
            .execute(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(name = "db_get_auction", fields(result = "success"), skip_all)]
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>> {
        let auction: Option<Auction> = sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_optional(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(auction.map(Auction::get_auction_entity))
    }

    #[instrument(name = "db_get_auctions", fields(result = "success"), skip_all)]
    async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
        category: Option<String>,
        product_name: Option<String>,
    ) -> anyhow::Result<Vec<entities::Auction>> {
        let mut query = QueryBuilder::new("SELECT * FROM auction WHERE TRUE");
        if let Some(status) = status {
            query
                .push(" AND status = ")
                .push_bind(AuctionStatus::from(status));
        }
        if let Some(category) = category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(product_name) = product_name {
            query
                .push(" AND product_name ILIKE ")
                .push_bind(format!("%{}%", escape_like_pattern(&product_name)));
        }
        query.push(" ORDER BY creation_time ASC");
        let auctions: Vec<Auction> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(auctions
            .into_iter()
            .map(Auction::get_auction_entity)
            .collect())
    }
}

fn escape_like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
