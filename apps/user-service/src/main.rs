use axum_helpers::server::{ShutdownCoordinator, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use domain_users::MongoUserRepository;
use std::time::Duration;
use tracing::info;

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

    MongoUserRepository::new(&db).create_indexes().await?;

    let state = AppState { db };
    let app = api::app(&state, config.app)?;
    let coordinator = ShutdownCoordinator::new();

    info!("Starting User Service");

    create_production_app(
        app,
        &config.server,
        coordinator,
        Duration::from_secs(30),
        async move {
            drop(mongo_client);
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User Service shutdown complete");
    Ok(())
}
