//! MongoDB implementation of TaskRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::doc, options::FindOptions};
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, invalid_fields};
use crate::repository::TaskRepository;

pub const COLLECTION: &str = "tasks";

pub struct MongoTaskRepository {
    collection: Collection<Task>,
}

impl MongoTaskRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Task>(COLLECTION),
        }
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[instrument(skip(self, task), fields(user_id = %task.user_id))]
    async fn save(&self, task: NewTask) -> TaskResult<Task> {
        task.validate()
            .map_err(|e| TaskError::Validation(invalid_fields(&e)))?;

        let task = Task::new(task);
        self.collection.insert_one(&task).await?;

        tracing::info!(task_id = %task.id, "Task stored");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        let options = FindOptions::builder().sort(doc! { "$natural": 1 }).build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let tasks: Vec<Task> = cursor.try_collect().await?;

        Ok(tasks)
    }
}
