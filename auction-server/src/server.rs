use {
    crate::{
        auction::service::{
            add_auction::AddAuctionInput,
            get_auction_by_id::GetAuctionByIdInput,
            get_auctions::GetAuctionsInput,
            Config,
            Service,
        },
        config::{
            server,
            CreateOptions,
            ListOptions,
        },
        kernel::db::DB,
    },
    anyhow::anyhow,
    sqlx::postgres::PgPoolOptions,
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

/// Cancelled once on the shutdown signal. Every creation scope is a child token, so shutting
/// down skips the closures that are still pending.
fn register_shutdown_handler() -> CancellationToken {
    let exit_token = CancellationToken::new();
    tokio::spawn({
        let exit_token = exit_token.clone();
        async move {
            tracing::info!("Registered shutdown signal handler...");
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = ?e, "Failed to listen for shutdown signal");
                return;
            }
            tracing::info!("Shut down signal received, canceling pending auction closures...");
            exit_token.cancel();
        }
    });
    exit_token
}

async fn connect_db(options: &server::Options) -> anyhow::Result<DB> {
    let db = PgPoolOptions::new()
        .max_connections(options.database_max_connections)
        .connect(&options.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to the database: {:?}", err))?;
    sqlx::migrate!()
        .run(&db)
        .await
        .map_err(|err| anyhow!("Failed to run database migrations: {:?}", err))?;
    Ok(db)
}

pub async fn create_auction(options: CreateOptions) -> anyhow::Result<()> {
    let exit_token = register_shutdown_handler();
    let db = connect_db(&options.server).await?;

    let closure_interval = options.auction.closure_interval();
    tracing::info!(
        closure_interval = %humantime::format_duration(closure_interval),
        "Auctions will be completed automatically"
    );
    let task_tracker = TaskTracker::new();
    let service = Service::new(db, Config { closure_interval }, task_tracker.clone());

    let auction = service
        .add_auction(AddAuctionInput {
            auction:            options.auction_create.into(),
            cancellation_token: exit_token.child_token(),
        })
        .await
        .map_err(|err| {
            if err.is_server_error() {
                anyhow!("Server error while creating auction: {}", err)
            } else {
                anyhow!("Rejected auction: {}", err)
            }
        })?;
    println!("{}", serde_json::to_string_pretty(&auction)?);

    tracing::info!("Waiting for the auction closure...");
    task_tracker.close();
    task_tracker.wait().await;

    let auction = service
        .get_auction_by_id(GetAuctionByIdInput {
            auction_id: auction.id,
        })
        .await
        .map_err(|err| anyhow!("Failed to read back auction: {}", err))?;
    tracing::info!(auction_id = %auction.id, status = %auction.status, "Auction closure resolved");
    Ok(())
}

pub async fn list_auctions(options: ListOptions) -> anyhow::Result<()> {
    let db = connect_db(&options.server).await?;
    // Listing never creates auctions, so the interval is irrelevant here.
    let service = Service::new(
        db,
        Config {
            closure_interval: crate::config::auction::DEFAULT_CLOSURE_INTERVAL,
        },
        TaskTracker::new(),
    );

    let auctions = service
        .get_auctions(GetAuctionsInput {
            status:       options.status,
            category:     options.category,
            product_name: options.product_name,
        })
        .await
        .map_err(|err| anyhow!("Failed to list auctions: {}", err))?;
    println!("{}", serde_json::to_string_pretty(&auctions)?);
    Ok(())
}
