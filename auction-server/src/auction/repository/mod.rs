use super::entities;

mod add_auction;
mod get_auction;
mod get_auctions;
mod models;
mod update_auction_status;

pub use models::*;

#[derive(Debug)]
pub struct Repository {
    pub db: Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self { db: Box::new(db) }
    }
}
