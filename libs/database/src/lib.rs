//! Database connectors and startup helpers.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, configuration and health check
//! - `config` - `core_config::FromEnv` implementations
//!
//! # Example
//!
//! ```ignore
//! use database::common::RetryConfig;
//! use database::mongodb::{MongoConfig, connect_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_with_retry(&config, RetryConfig::default()).await?;
//! let db = config.select_database(&client);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
