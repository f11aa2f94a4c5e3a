//! MongoDB connector and utilities

mod config;
mod connector;
mod health;

pub use config::{FALLBACK_DATABASE, MongoConfig};
pub use connector::{MongoError, connect, connect_with_retry};
pub use health::check_health;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database, bson};
