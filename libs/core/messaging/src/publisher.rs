//! Event publisher with a bounded connect loop.
//!
//! ```text
//! Disconnected ──connect()──▶ Connecting ──ok──▶ Ready
//!                                │  ▲
//!                          error │  │ backoff
//!                                ▼  │
//!                         attempts left?
//!                                │ no / shutdown
//!                                ▼
//!                          Disconnected (terminal)
//! ```
//!
//! The loop runs once per publisher. After it gives up the publisher stays
//! unavailable until the process restarts.

use crate::config::ConnectPolicy;
use crate::error::MessagingError;
use crate::queue::{QueueChannel, QueueConnector, QueueSpec};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// Connection lifecycle of an [`EventPublisher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublisherState {
    Disconnected,
    Connecting,
    Ready,
}

impl fmt::Display for PublisherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublisherState::Disconnected => write!(f, "disconnected"),
            PublisherState::Connecting => write!(f, "connecting"),
            PublisherState::Ready => write!(f, "ready"),
        }
    }
}

/// Result of a publish call that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The event was handed to the broker
    Published,
    /// The publisher is not ready; the event was dropped without a send
    Unavailable,
}

/// Owns the process-wide queue channel and publishes events to one queue.
pub struct EventPublisher {
    queue: QueueSpec,
    state: watch::Sender<PublisherState>,
    channel: OnceLock<Arc<dyn QueueChannel>>,
    started: AtomicBool,
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher")
            .field("queue", &self.queue.name)
            .field("state", &self.state())
            .finish()
    }
}

impl EventPublisher {
    /// Creates a publisher for the durable queue `queue`, initially `Disconnected`.
    pub fn new(queue: impl Into<String>) -> Self {
        let (state, _) = watch::channel(PublisherState::Disconnected);
        Self {
            queue: QueueSpec::durable(queue),
            state,
            channel: OnceLock::new(),
            started: AtomicBool::new(false),
        }
    }

    pub fn queue_name(&self) -> &str {
        &self.queue.name
    }

    pub fn state(&self) -> PublisherState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<PublisherState> {
        self.state.subscribe()
    }

    /// `Ready` and the underlying connection still reports itself up.
    pub fn is_healthy(&self) -> bool {
        self.state() == PublisherState::Ready
            && self.channel.get().is_some_and(|channel| channel.is_connected())
    }

    /// Runs the connect loop: up to `policy.max_attempts` attempts with a fixed
    /// `policy.backoff` between failures. Each attempt opens a channel and
    /// declares the queue.
    ///
    /// Resolving `shutdown` aborts the loop, leaving the publisher
    /// `Disconnected`. Returns the terminal state.
    ///
    /// # Errors
    /// [`MessagingError::AlreadyStarted`] if the loop already ran on this publisher.
    #[instrument(skip_all, fields(queue = %self.queue.name, max_attempts = policy.max_attempts))]
    pub async fn connect<C, F>(
        &self,
        connector: &C,
        policy: &ConnectPolicy,
        shutdown: F,
    ) -> Result<PublisherState, MessagingError>
    where
        C: QueueConnector + ?Sized,
        F: Future<Output = ()>,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(MessagingError::AlreadyStarted);
        }

        self.state.send_replace(PublisherState::Connecting);
        tokio::pin!(shutdown);

        let max_attempts = policy.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            let result = tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(self.cancelled(attempt)),
                result = self.try_connect(connector) => result,
            };

            match result {
                Ok(channel) => {
                    let _ = self.channel.set(channel);
                    self.state.send_replace(PublisherState::Ready);
                    info!(attempt, "Publisher connected and queue declared");
                    return Ok(PublisherState::Ready);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Publisher connection attempt failed");
                }
            }

            if attempt < max_attempts {
                debug!(backoff = ?policy.backoff, "Waiting before next connection attempt");
                tokio::select! {
                    biased;
                    _ = &mut shutdown => return Ok(self.cancelled(attempt)),
                    _ = tokio::time::sleep(policy.backoff) => {}
                }
            }
        }

        error!(
            attempts = max_attempts,
            "Publisher gave up connecting; events will not be published until restart"
        );
        self.state.send_replace(PublisherState::Disconnected);
        Ok(PublisherState::Disconnected)
    }

    async fn try_connect<C>(&self, connector: &C) -> Result<Arc<dyn QueueChannel>, MessagingError>
    where
        C: QueueConnector + ?Sized,
    {
        let channel = connector.connect().await?;
        channel.declare_queue(&self.queue).await?;
        Ok(channel)
    }

    fn cancelled(&self, attempt: u32) -> PublisherState {
        info!(attempt, "Publisher connect loop cancelled by shutdown");
        self.state.send_replace(PublisherState::Disconnected);
        PublisherState::Disconnected
    }

    /// Serializes `event` as JSON and sends it to the queue.
    ///
    /// Returns [`PublishOutcome::Unavailable`] without serializing or sending
    /// when the publisher is not `Ready`.
    ///
    /// # Errors
    /// A send that fails on a ready channel is returned as
    /// [`MessagingError::Send`]; it is not retried.
    #[instrument(skip_all, fields(queue = %self.queue.name))]
    pub async fn publish<E>(&self, event: &E) -> Result<PublishOutcome, MessagingError>
    where
        E: Serialize + Sync + ?Sized,
    {
        let channel = match (self.state(), self.channel.get()) {
            (PublisherState::Ready, Some(channel)) => channel,
            (state, _) => {
                debug!(%state, "Publisher not ready, dropping event");
                return Ok(PublishOutcome::Unavailable);
            }
        };

        let payload = serde_json::to_vec(event)?;
        channel.send(&self.queue.name, payload).await?;
        debug!("Event published");
        Ok(PublishOutcome::Published)
    }

    /// Flushes the channel if one was established.
    pub async fn close(&self) {
        if let Some(channel) = self.channel.get() {
            if let Err(e) = channel.flush().await {
                warn!(error = %e, "Failed to flush publisher channel");
            }
        }
    }
}
