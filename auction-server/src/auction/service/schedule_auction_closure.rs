use {
    super::{
        close_auction::CloseAuctionInput,
        Service,
    },
    crate::auction::entities,
    tokio_util::sync::CancellationToken,
    tracing::{
        info_span,
        Instrument,
    },
};

pub struct ScheduleAuctionClosureInput {
    pub auction_id:         entities::AuctionId,
    /// Cancelled when the request that created the auction is aborted.
    pub cancellation_token: CancellationToken,
}

impl Service {
    /// Spawns the closure unit of a freshly inserted auction and returns immediately.
    ///
    /// The unit races the closure interval against the cancellation token. If the interval
    /// elapses first the auction is completed, otherwise nothing is written. The unit is
    /// unsupervised: no handle is returned and the task tracker is only awaited on shutdown.
    pub fn schedule_auction_closure(&self, input: ScheduleAuctionClosureInput) {
        let ScheduleAuctionClosureInput {
            auction_id,
            cancellation_token,
        } = input;
        let closure_interval = self.config.closure_interval;
        self.task_tracker.spawn({
            let service = self.clone();
            async move {
                tokio::select! {
                    _ = tokio::time::sleep(closure_interval) => {
                        service.close_auction(CloseAuctionInput { auction_id }).await;
                    }
                    _ = cancellation_token.cancelled() => {
                        tracing::info!("Auction closure canceled by context");
                    }
                }
            }
            .instrument(info_span!("auction_closure", auction_id = %auction_id))
        });
    }
}
