//! In-process broker for tests.
//!
//! Connection and send failures can be switched on and off, and every call is
//! counted so tests can assert on exact attempt numbers.

use crate::error::MessagingError;
use crate::queue::{QueueChannel, QueueConnector, QueueSpec};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct BrokerState {
    reachable: bool,
    /// Connection attempts that still fail before the broker comes up
    failures_left: u32,
    fail_declares: bool,
    fail_sends: bool,
    connect_attempts: u32,
    declare_calls: u32,
    send_calls: u32,
    queues: HashMap<String, Vec<Vec<u8>>>,
}

/// Shared handle to an in-memory broker. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct InMemoryBroker {
    state: Arc<Mutex<BrokerState>>,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBroker {
    /// A healthy broker.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BrokerState {
                reachable: true,
                ..Default::default()
            })),
        }
    }

    /// A broker that refuses every connection until [`set_reachable`](Self::set_reachable).
    pub fn unreachable() -> Self {
        let broker = Self::new();
        broker.lock().reachable = false;
        broker
    }

    /// A broker whose first `failures` connection attempts fail.
    pub fn failing_first(failures: u32) -> Self {
        let broker = Self::new();
        broker.lock().failures_left = failures;
        broker
    }

    fn lock(&self) -> MutexGuard<'_, BrokerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    pub fn fail_declares(&self, fail: bool) {
        self.lock().fail_declares = fail;
    }

    pub fn fail_sends(&self, fail: bool) {
        self.lock().fail_sends = fail;
    }

    pub fn connect_attempts(&self) -> u32 {
        self.lock().connect_attempts
    }

    pub fn declare_calls(&self) -> u32 {
        self.lock().declare_calls
    }

    pub fn send_calls(&self) -> u32 {
        self.lock().send_calls
    }

    pub fn queue_count(&self) -> usize {
        self.lock().queues.len()
    }

    pub fn has_queue(&self, name: &str) -> bool {
        self.lock().queues.contains_key(name)
    }

    /// Payloads delivered to `queue`, oldest first.
    pub fn messages(&self, queue: &str) -> Vec<Vec<u8>> {
        self.lock().queues.get(queue).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl QueueConnector for InMemoryBroker {
    async fn connect(&self) -> Result<Arc<dyn QueueChannel>, MessagingError> {
        let mut state = self.lock();
        state.connect_attempts += 1;

        if !state.reachable {
            return Err(MessagingError::connection("connection refused"));
        }
        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err(MessagingError::connection("connection reset by peer"));
        }

        Ok(Arc::new(InMemoryChannel {
            broker: self.clone(),
        }))
    }
}

struct InMemoryChannel {
    broker: InMemoryBroker,
}

#[async_trait]
impl QueueChannel for InMemoryChannel {
    async fn declare_queue(&self, queue: &QueueSpec) -> Result<(), MessagingError> {
        let mut state = self.broker.lock();
        state.declare_calls += 1;

        if state.fail_declares {
            return Err(MessagingError::declaration(&queue.name, "access refused"));
        }

        state.queues.entry(queue.name.clone()).or_default();
        Ok(())
    }

    async fn send(&self, queue: &str, payload: Vec<u8>) -> Result<(), MessagingError> {
        let mut state = self.broker.lock();
        state.send_calls += 1;

        if state.fail_sends || !state.reachable {
            return Err(MessagingError::send(queue, "channel closed"));
        }

        match state.queues.get_mut(queue) {
            Some(messages) => {
                messages.push(payload);
                Ok(())
            }
            None => Err(MessagingError::send(queue, "queue not declared")),
        }
    }

    fn is_connected(&self) -> bool {
        self.broker.lock().reachable
    }
}
