//! Backend-agnostic queue abstractions.

use crate::error::MessagingError;
use async_trait::async_trait;
use std::sync::Arc;

/// Declaration of a durable queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSpec {
    pub name: String,
    /// Survives broker restarts
    pub durable: bool,
}

impl QueueSpec {
    pub fn durable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            durable: true,
        }
    }
}

/// Opens channels to a broker. One call is one connection attempt.
#[async_trait]
pub trait QueueConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn QueueChannel>, MessagingError>;
}

/// A live channel to the broker, shared by every publish call in the process.
///
/// Implementations must be safe for concurrent use without external locking.
#[async_trait]
pub trait QueueChannel: Send + Sync {
    /// Declares `queue`. Declaring an existing queue is a no-op.
    async fn declare_queue(&self, queue: &QueueSpec) -> Result<(), MessagingError>;

    /// Sends an opaque payload to `queue`.
    async fn send(&self, queue: &str, payload: Vec<u8>) -> Result<(), MessagingError>;

    /// Flushes pending writes before the process exits.
    async fn flush(&self) -> Result<(), MessagingError> {
        Ok(())
    }

    /// Whether the underlying connection is currently up.
    fn is_connected(&self) -> bool;
}
