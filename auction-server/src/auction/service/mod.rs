use {
    super::repository::{
        self,
        Database,
        Repository,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

pub mod add_auction;
pub mod close_auction;
pub mod get_auction_by_id;
pub mod get_auctions;
pub mod schedule_auction_closure;

pub struct Config {
    /// How long an auction stays open before it is completed automatically.
    pub closure_interval: Duration,
}

pub struct ServiceInner {
    repo:         Arc<Repository>,
    config:       Config,
    task_tracker: TaskTracker,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(db: impl Database, config: Config, task_tracker: TaskTracker) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(repository::Repository::new(db)),
            config,
            task_tracker,
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::{
            Config,
            Service,
        },
        crate::auction::{
            entities,
            repository::MockDatabase,
        },
        std::{
            sync::{
                Arc,
                Mutex,
            },
            time::Duration,
        },
        tokio::time::Instant,
        tokio_util::task::TaskTracker,
    };

    #[derive(Clone, Debug)]
    pub struct StatusUpdate {
        pub auction_id: entities::AuctionId,
        pub new_status: entities::AuctionStatus,
        pub time:       Instant,
    }

    pub type StatusUpdates = Arc<Mutex<Vec<StatusUpdate>>>;

    /// A database that accepts every insert and records every status update.
    pub fn get_recording_db(
        update_result: fn() -> anyhow::Result<bool>,
    ) -> (MockDatabase, StatusUpdates) {
        let updates = StatusUpdates::default();
        let mut db = MockDatabase::new();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_update_auction_status().returning({
            let updates = updates.clone();
            move |auction_id, new_status| {
                updates.lock().unwrap().push(StatusUpdate {
                    auction_id,
                    new_status,
                    time: Instant::now(),
                });
                update_result()
            }
        });
        (db, updates)
    }

    impl Service {
        pub fn new_with_mocks(db: MockDatabase, closure_interval: Duration) -> Self {
            Service::new(db, Config { closure_interval }, TaskTracker::new())
        }

        /// Stops accepting closure units and waits for the scheduled ones to finish.
        pub async fn wait_for_closures(&self) {
            self.task_tracker.close();
            self.task_tracker.wait().await;
        }
    }

    pub fn get_auction_create() -> entities::AuctionCreate {
        entities::AuctionCreate {
            product_name: "Fender Stratocaster".to_string(),
            category:     "guitars".to_string(),
            description:  "1962 reissue, lightly played".to_string(),
            condition:    entities::ProductCondition::Used,
        }
    }
}
