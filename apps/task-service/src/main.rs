use axum_helpers::server::{ShutdownCoordinator, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use messaging::{EventPublisher, NatsConnector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB");
    let mongo_client =
        database::mongodb::connect_with_retry(&config.mongodb, RetryConfig::default()).await?;
    let db = config.mongodb.select_database(&mongo_client);
    info!(database = %db.name(), "Connected to MongoDB");

    let coordinator = ShutdownCoordinator::new();

    // The HTTP listener comes up while the publisher is still connecting;
    // requests in that window get the degraded response.
    let publisher = Arc::new(EventPublisher::new(config.publisher.queue.clone()));
    let connect_loop = {
        let publisher = Arc::clone(&publisher);
        let connector = NatsConnector::new(config.nats.clone());
        let policy = config.publisher.connect;
        let cancel = coordinator.cancelled();
        async move {
            match publisher.connect(&connector, &policy, cancel).await {
                Ok(state) => info!(%state, "Publisher connect loop finished"),
                Err(e) => error!(error = %e, "Publisher connect loop failed"),
            }
        }
    };
    tokio::spawn(connect_loop);

    let state = AppState {
        db,
        publisher: Arc::clone(&publisher),
    };
    let app = api::app(&state, config.app)?;

    info!("Starting Task Service");

    create_production_app(
        app,
        &config.server,
        coordinator,
        Duration::from_secs(30),
        async move {
            publisher.close().await;
            drop(mongo_client);
            info!("Publisher and MongoDB connections closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Task Service shutdown complete");
    Ok(())
}
