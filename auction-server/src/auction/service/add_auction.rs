use {
    super::{
        schedule_auction_closure::ScheduleAuctionClosureInput,
        Service,
    },
    crate::{
        auction::entities,
        kernel::error::ServiceError,
    },
    tokio_util::sync::CancellationToken,
};

pub struct AddAuctionInput {
    pub auction:            entities::AuctionCreate,
    /// Scope of the creation request. Cancelling it before the closure interval elapses skips
    /// the automatic closure.
    pub cancellation_token: CancellationToken,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, ServiceError> {
        input
            .auction
            .validate()
            .map_err(ServiceError::BadParameters)?;
        let auction = entities::Auction::new(input.auction);
        tracing::Span::current().record("auction_id", auction.id.to_string());

        let auction = self.repo.add_auction(auction).await.map_err(|e| {
            tracing::error!(error = ?e, "Error trying to insert auction");
            ServiceError::TemporarilyUnavailable
        })?;
        self.schedule_auction_closure(ScheduleAuctionClosureInput {
            auction_id:         auction.id,
            cancellation_token: input.cancellation_token,
        });
        Ok(auction)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            repository::MockDatabase,
            service::tests::{
                get_auction_create,
                get_recording_db,
            },
        },
        crate::config::auction::resolve_closure_interval,
        std::{
            sync::{
                atomic::{
                    AtomicUsize,
                    Ordering,
                },
                Arc,
            },
            time::Duration,
        },
        tokio::time::Instant,
    };

    const CLOSURE_INTERVAL: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_add_auction_returns_before_closure() {
        let (db, updates) = get_recording_db(|| Ok(true));
        let service = Service::new_with_mocks(db, CLOSURE_INTERVAL);
        let start = Instant::now();

        let auction = service
            .add_auction(AddAuctionInput {
                auction:            get_auction_create(),
                cancellation_token: CancellationToken::new(),
            })
            .await
            .unwrap();
        assert_eq!(auction.status, entities::AuctionStatus::Open);
        assert!(updates.lock().unwrap().is_empty());
        assert_eq!(service.task_tracker.len(), 1);

        service.wait_for_closures().await;
        let updates = updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].auction_id, auction.id);
        assert_eq!(updates[0].new_status, entities::AuctionStatus::Completed);
        assert!(updates[0].time - start >= CLOSURE_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_auction_closes_after_default_interval() {
        let (db, updates) = get_recording_db(|| Ok(true));
        let closure_interval = resolve_closure_interval(Some("not a duration"));
        let service = Service::new_with_mocks(db, closure_interval);
        let start = Instant::now();

        service
            .add_auction(AddAuctionInput {
                auction:            get_auction_create(),
                cancellation_token: CancellationToken::new(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(9_900)).await;
        assert!(updates.lock().unwrap().is_empty());

        service.wait_for_closures().await;
        let updates = updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert!(updates[0].time - start >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_auction_with_failing_closure_still_succeeds() {
        let (db, updates) = get_recording_db(|| Err(anyhow::anyhow!("connection refused")));
        let service = Service::new_with_mocks(db, CLOSURE_INTERVAL);

        let result = service
            .add_auction(AddAuctionInput {
                auction:            get_auction_create(),
                cancellation_token: CancellationToken::new(),
            })
            .await;
        assert!(result.is_ok());

        service.wait_for_closures().await;
        assert_eq!(updates.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_auction_insert_failure_skips_closure() {
        let update_calls = Arc::new(AtomicUsize::new(0));
        let mut db = MockDatabase::new();
        db.expect_add_auction()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("duplicate key value")));
        db.expect_update_auction_status().returning({
            let update_calls = update_calls.clone();
            move |_, _| {
                update_calls.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
        });
        let service = Service::new_with_mocks(db, CLOSURE_INTERVAL);

        let result = service
            .add_auction(AddAuctionInput {
                auction:            get_auction_create(),
                cancellation_token: CancellationToken::new(),
            })
            .await;
        let error = result.unwrap_err();
        assert_eq!(error, ServiceError::TemporarilyUnavailable);
        assert!(error.is_server_error());
        assert!(service.task_tracker.is_empty());

        service.wait_for_closures().await;
        tokio::time::sleep(CLOSURE_INTERVAL * 2).await;
        assert_eq!(update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_add_auction_rejects_invalid_input() {
        let mut db = MockDatabase::new();
        db.expect_add_auction().never();
        db.expect_update_auction_status().never();
        let service = Service::new_with_mocks(db, CLOSURE_INTERVAL);
        let mut auction = get_auction_create();
        auction.description = "mint".to_string();

        let result = service
            .add_auction(AddAuctionInput {
                auction,
                cancellation_token: CancellationToken::new(),
            })
            .await;
        assert!(matches!(result, Err(ServiceError::BadParameters(_))));
        assert!(service.task_tracker.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_creation_scope_skips_closure() {
        let (db, updates) = get_recording_db(|| Ok(true));
        let service = Service::new_with_mocks(db, CLOSURE_INTERVAL);
        let request_token = CancellationToken::new();

        let cancelled = service
            .add_auction(AddAuctionInput {
                auction:            get_auction_create(),
                cancellation_token: request_token.clone(),
            })
            .await
            .unwrap();
        let kept = service
            .add_auction(AddAuctionInput {
                auction:            get_auction_create(),
                cancellation_token: CancellationToken::new(),
            })
            .await
            .unwrap();
        request_token.cancel();

        service.wait_for_closures().await;
        let updated_ids: Vec<_> = updates
            .lock()
            .unwrap()
            .iter()
            .map(|update| update.auction_id)
            .collect();
        assert_eq!(updated_ids, vec![kept.id]);
        assert_ne!(cancelled.id, kept.id);
    }
}
