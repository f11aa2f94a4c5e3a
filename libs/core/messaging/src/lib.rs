//! Durable queue publishing.
//!
//! An [`EventPublisher`] owns one process-wide channel to a broker. It is
//! created `Disconnected`, runs a bounded connect loop once at startup, and
//! then either publishes events or reports itself unavailable for the rest of
//! the process lifetime.
//!
//! # Backends
//!
//! - **`nats`** (default): NATS JetStream, one stream per queue
//! - **`memory`**: in-process broker with switchable failures, for tests
//!
//! # Example
//!
//! ```ignore
//! use messaging::{EventPublisher, NatsConfig, NatsConnector, PublisherConfig};
//!
//! let publisher = Arc::new(EventPublisher::new(&config.queue));
//! let connector = NatsConnector::new(NatsConfig::from_env()?);
//!
//! tokio::spawn({
//!     let publisher = Arc::clone(&publisher);
//!     async move { publisher.connect(&connector, &config.connect, shutdown).await }
//! });
//!
//! match publisher.publish(&event).await? {
//!     PublishOutcome::Published => {}
//!     PublishOutcome::Unavailable => { /* degraded */ }
//! }
//! ```

mod config;
mod error;
mod publisher;
mod queue;

#[cfg(any(test, feature = "memory"))]
pub mod memory;
#[cfg(feature = "nats")]
mod nats;

pub use config::{ConnectPolicy, NatsConfig, PublisherConfig};
pub use error::MessagingError;
pub use publisher::{EventPublisher, PublishOutcome, PublisherState};
pub use queue::{QueueChannel, QueueConnector, QueueSpec};

#[cfg(feature = "nats")]
pub use nats::{NatsChannel, NatsConnector};
