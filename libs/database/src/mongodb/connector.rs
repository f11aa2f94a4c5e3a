use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Builds a client from `config` and verifies it with a `ping`.
///
/// The driver connects lazily, so the ping is what surfaces an unreachable
/// server here instead of on the first request.
#[instrument(skip_all, fields(app_name = ?config.app_name))]
pub async fn connect(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// [`connect`] with exponential backoff between attempts.
///
/// # Example
/// ```ignore
/// let retry = RetryConfig::new().with_max_attempts(10);
/// let client = connect_with_retry(&config, retry).await?;
/// ```
pub async fn connect_with_retry(
    config: &MongoConfig,
    retry_config: RetryConfig,
) -> Result<Client, MongoError> {
    retry_with_backoff("mongodb", || connect(config), retry_config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_uri_is_rejected_before_connecting() {
        let config = MongoConfig::new("postgres://localhost:5432");
        let err = connect(&config).await.unwrap_err();
        assert!(matches!(err, MongoError::Mongo(_)));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect() {
        let url = std::env::var("MONGO_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let result = connect(&MongoConfig::new(url)).await;
        assert!(result.is_ok());
    }
}
