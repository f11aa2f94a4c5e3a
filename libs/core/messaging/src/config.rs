//! Publisher and broker configuration.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

/// Bounded, fixed-interval retry used while establishing the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectPolicy {
    /// Total connection attempts, including the first one
    pub max_attempts: u32,
    /// Fixed wait between two failed attempts
    pub backoff: Duration,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(5),
        }
    }
}

impl ConnectPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

/// Which queue to publish to and how hard to try connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    pub queue: String,
    pub connect: ConnectPolicy,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            queue: "task_created".to_string(),
            connect: ConnectPolicy::default(),
        }
    }
}

impl FromEnv for PublisherConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_attempts: u32 =
            env_parse("PUBLISHER_CONNECT_ATTEMPTS", defaults.connect.max_attempts)?;
        if max_attempts == 0 {
            return Err(ConfigError::ParseError {
                key: "PUBLISHER_CONNECT_ATTEMPTS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }
        let delay_secs: u64 = env_parse(
            "PUBLISHER_RETRY_DELAY_SECS",
            defaults.connect.backoff.as_secs(),
        )?;

        Ok(Self {
            queue: env_or_default("TASK_EVENTS_QUEUE", &defaults.queue),
            connect: ConnectPolicy::new(max_attempts, Duration::from_secs(delay_secs)),
        })
    }
}

/// NATS connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatsConfig {
    pub url: String,
    /// Client name reported to the server
    pub client_name: String,
    pub connect_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            url: "nats://localhost:4222".to_string(),
            client_name: "task-service".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl NatsConfig {
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }
}

impl FromEnv for NatsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout_secs: u64 = env_parse(
            "NATS_CONNECT_TIMEOUT_SECS",
            defaults.connect_timeout.as_secs(),
        )?;

        Ok(Self {
            url: env_or_default("NATS_URL", &defaults.url),
            client_name: defaults.client_name,
            connect_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
