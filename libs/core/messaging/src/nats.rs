//! NATS JetStream backend.
//!
//! A queue maps onto a JetStream stream of the same name, bound to a single
//! subject of that name, with file storage and work-queue retention so each
//! message is consumed once.

use crate::config::NatsConfig;
use crate::error::MessagingError;
use crate::queue::{QueueChannel, QueueConnector, QueueSpec};
use async_nats::jetstream::{self, Context, stream};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Opens JetStream channels to a NATS server.
#[derive(Debug, Clone)]
pub struct NatsConnector {
    config: NatsConfig,
}

impl NatsConnector {
    pub fn new(config: NatsConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl QueueConnector for NatsConnector {
    async fn connect(&self) -> Result<Arc<dyn QueueChannel>, MessagingError> {
        debug!(url = %self.config.url, "Connecting to NATS");

        let client = async_nats::ConnectOptions::new()
            .name(&self.config.client_name)
            .connection_timeout(self.config.connect_timeout)
            .connect(self.config.url.as_str())
            .await
            .map_err(|e| MessagingError::connection(e.to_string()))?;

        info!(url = %self.config.url, "Connected to NATS");

        let jetstream = jetstream::new(client.clone());
        Ok(Arc::new(NatsChannel { client, jetstream }))
    }
}

/// A JetStream context over one client connection.
pub struct NatsChannel {
    client: async_nats::Client,
    jetstream: Context,
}

pub(crate) fn stream_config(queue: &QueueSpec) -> stream::Config {
    stream::Config {
        name: queue.name.clone(),
        subjects: vec![queue.name.clone()],
        retention: stream::RetentionPolicy::WorkQueue,
        storage: if queue.durable {
            stream::StorageType::File
        } else {
            stream::StorageType::Memory
        },
        ..Default::default()
    }
}

#[async_trait]
impl QueueChannel for NatsChannel {
    async fn declare_queue(&self, queue: &QueueSpec) -> Result<(), MessagingError> {
        self.jetstream
            .get_or_create_stream(stream_config(queue))
            .await
            .map_err(|e| MessagingError::declaration(&queue.name, e.to_string()))?;

        debug!(stream = %queue.name, "Stream ready");
        Ok(())
    }

    async fn send(&self, queue: &str, payload: Vec<u8>) -> Result<(), MessagingError> {
        let ack = self
            .jetstream
            .publish(queue.to_string(), payload.into())
            .await
            .map_err(|e| MessagingError::send(queue, e.to_string()))?
            .await
            .map_err(|e| MessagingError::send(queue, e.to_string()))?;

        debug!(stream = %ack.stream, sequence = ack.sequence, "Published message");
        Ok(())
    }

    async fn flush(&self) -> Result<(), MessagingError> {
        self.client
            .flush()
            .await
            .map_err(|e| MessagingError::connection(e.to_string()))
    }

    fn is_connected(&self) -> bool {
        matches!(
            self.client.connection_state(),
            async_nats::connection::State::Connected
        )
    }
}
