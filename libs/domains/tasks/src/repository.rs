use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{NewTask, Task};

/// Persistence gateway for tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task, assigning its id and creation time.
    ///
    /// Rejects records with empty fields even though callers validate first.
    async fn save(&self, task: NewTask) -> TaskResult<Task>;

    /// Every stored task, in insertion order. Empty is not an error.
    async fn find_all(&self) -> TaskResult<Vec<Task>>;
}
