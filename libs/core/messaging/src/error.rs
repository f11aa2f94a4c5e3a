//! Error types for queue publishing.

use thiserror::Error;

/// Error that can occur while connecting to or publishing on a queue.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Broker unreachable or handshake rejected
    #[error("Connection error: {0}")]
    Connection(String),

    /// The broker refused to declare the target queue
    #[error("Failed to declare queue '{queue}': {details}")]
    QueueDeclaration { queue: String, details: String },

    /// Send failed on a channel that was ready
    #[error("Failed to send to queue '{queue}': {details}")]
    Send { queue: String, details: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `connect` was called on a publisher that already ran its connect loop
    #[error("Publisher connect loop has already been started")]
    AlreadyStarted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] core_config::ConfigError),
}

impl MessagingError {
    pub fn connection(details: impl Into<String>) -> Self {
        Self::Connection(details.into())
    }

    pub fn send(queue: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Send {
            queue: queue.into(),
            details: details.into(),
        }
    }

    pub fn declaration(queue: impl Into<String>, details: impl Into<String>) -> Self {
        Self::QueueDeclaration {
            queue: queue.into(),
            details: details.into(),
        }
    }
}
