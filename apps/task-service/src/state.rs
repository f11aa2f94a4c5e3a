//! Shared application state.

use messaging::EventPublisher;
use mongodb::Database;
use std::sync::Arc;

/// Cloned into every handler; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Shared with the background connect loop started in `main`
    pub publisher: Arc<EventPublisher>,
}
