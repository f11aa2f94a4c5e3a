//! Task Service - the creation workflow

use messaging::PublishOutcome;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::{TaskError, TaskResult};
use crate::events::TaskEventPublisher;
use crate::models::{CreateTask, NewTask, Task, TaskCreatedEvent};
use crate::repository::TaskRepository;

/// How a successful `create_task` ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskCreation {
    /// Stored and the event was published
    Created(Task),
    /// Stored, but the publisher was unavailable so no event was sent
    Degraded(Task),
}

impl TaskCreation {
    pub fn task(&self) -> &Task {
        match self {
            TaskCreation::Created(task) | TaskCreation::Degraded(task) => task,
        }
    }
}

/// Validate, persist, then publish.
///
/// Persistence and publishing are not transactional: a stored task stays
/// stored whatever happens to its event.
pub struct TaskService<R: TaskRepository, P: TaskEventPublisher + ?Sized> {
    repository: Arc<R>,
    publisher: Arc<P>,
}

impl<R: TaskRepository, P: TaskEventPublisher + ?Sized> TaskService<R, P> {
    pub fn new(repository: R, publisher: Arc<P>) -> Self {
        Self {
            repository: Arc::new(repository),
            publisher,
        }
    }

    /// # Errors
    /// - [`TaskError::Validation`] before anything is stored
    /// - [`TaskError::StoreUnavailable`] when the write fails; nothing is published
    /// - [`TaskError::Publish`] when a send fails on a ready channel; the task is already stored
    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<TaskCreation> {
        let new_task = NewTask::try_from(input).map_err(|fields| {
            info!(?fields, "Rejected task with missing fields");
            TaskError::Validation(fields)
        })?;

        let task = self.repository.save(new_task).await.inspect_err(|e| {
            error!(error = %e, "Failed to store task");
        })?;

        let event = TaskCreatedEvent::from(&task);
        match self.publisher.publish_task_created(&event).await {
            Ok(PublishOutcome::Published) => {
                info!(task_id = %task.id, "Task created and event published");
                Ok(TaskCreation::Created(task))
            }
            Ok(PublishOutcome::Unavailable) => {
                warn!(task_id = %task.id, "Task stored but publisher unavailable; event dropped");
                Ok(TaskCreation::Degraded(task))
            }
            Err(e) => {
                error!(task_id = %task.id, error = %e, "Task stored but event send failed");
                Err(TaskError::Publish(e))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.find_all().await
    }
}

impl<R: TaskRepository, P: TaskEventPublisher + ?Sized> Clone for TaskService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            publisher: Arc::clone(&self.publisher),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockTaskEventPublisher;
    use crate::repository::MockTaskRepository;
    use messaging::MessagingError;

    fn input(title: &str, description: &str, user_id: &str) -> CreateTask {
        CreateTask {
            title: Some(title.into()),
            description: Some(description.into()),
            user_id: Some(user_id.into()),
        }
    }

    fn storing_repository() -> MockTaskRepository {
        let mut repo = MockTaskRepository::new();
        repo.expect_save().times(1).returning(|new| Ok(Task::new(new)));
        repo
    }

    fn publisher_returning(outcome: PublishOutcome) -> MockTaskEventPublisher {
        let mut publisher = MockTaskEventPublisher::new();
        publisher
            .expect_publish_task_created()
            .times(1)
            .returning(move |_| Ok(outcome));
        publisher
    }

    #[tokio::test]
    async fn test_full_success_publishes_one_event() {
        let mut publisher = MockTaskEventPublisher::new();
        publisher
            .expect_publish_task_created()
            .withf(|event| event.user_id == "u123" && event.title == "Buy milk")
            .times(1)
            .returning(|_| Ok(PublishOutcome::Published));

        let service = TaskService::new(storing_repository(), Arc::new(publisher));
        let outcome = service
            .create_task(input("Buy milk", "2%", "u123"))
            .await
            .unwrap();

        let TaskCreation::Created(task) = outcome else {
            panic!("expected full success, got {outcome:?}");
        };
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "2%");
        assert_eq!(task.user_id, "u123");
    }

    #[tokio::test]
    async fn test_event_carries_stored_id() {
        let mut repo = MockTaskRepository::new();
        let stored = Task::new(NewTask {
            title: "Buy milk".into(),
            description: "2%".into(),
            user_id: "u123".into(),
        });
        let stored_id = stored.id;
        repo.expect_save()
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let mut publisher = MockTaskEventPublisher::new();
        publisher
            .expect_publish_task_created()
            .withf(move |event| event.task_id == stored_id)
            .times(1)
            .returning(|_| Ok(PublishOutcome::Published));

        let service = TaskService::new(repo, Arc::new(publisher));
        let outcome = service
            .create_task(input("Buy milk", "2%", "u123"))
            .await
            .unwrap();
        assert_eq!(outcome.task().id, stored_id);
    }

    #[tokio::test]
    async fn test_invalid_input_touches_neither_store_nor_publisher() {
        let cases = [
            input("", "desc", "u1"),
            CreateTask {
                description: None,
                ..input("t", "d", "u1")
            },
            input("t", "d", ""),
            CreateTask::default(),
        ];

        for case in cases {
            let mut repo = MockTaskRepository::new();
            repo.expect_save().never();
            let mut publisher = MockTaskEventPublisher::new();
            publisher.expect_publish_task_created().never();

            let service = TaskService::new(repo, Arc::new(publisher));
            let err = service.create_task(case).await.unwrap_err();
            assert!(matches!(err, TaskError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_validation_names_missing_field() {
        let mut repo = MockTaskRepository::new();
        repo.expect_save().never();
        let mut publisher = MockTaskEventPublisher::new();
        publisher.expect_publish_task_created().never();

        let service = TaskService::new(repo, Arc::new(publisher));
        let err = service
            .create_task(input("", "desc", "u1"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required field(s): title");
    }

    #[tokio::test]
    async fn test_store_failure_never_publishes() {
        let mut repo = MockTaskRepository::new();
        repo.expect_save()
            .times(1)
            .returning(|_| Err(TaskError::StoreUnavailable("no primary".into())));
        let mut publisher = MockTaskEventPublisher::new();
        publisher.expect_publish_task_created().never();

        let service = TaskService::new(repo, Arc::new(publisher));
        let err = service
            .create_task(input("Buy milk", "2%", "u123"))
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unavailable_publisher_degrades_but_keeps_task() {
        let service = TaskService::new(
            storing_repository(),
            Arc::new(publisher_returning(PublishOutcome::Unavailable)),
        );

        let outcome = service
            .create_task(input("Buy milk", "2%", "u123"))
            .await
            .unwrap();

        assert!(matches!(outcome, TaskCreation::Degraded(_)));
        assert_eq!(outcome.task().title, "Buy milk");
    }

    #[tokio::test]
    async fn test_send_failure_on_ready_channel_is_fatal() {
        let mut publisher = MockTaskEventPublisher::new();
        publisher
            .expect_publish_task_created()
            .times(1)
            .returning(|_| Err(MessagingError::send("task_created", "broken pipe")));

        let service = TaskService::new(storing_repository(), Arc::new(publisher));
        let err = service
            .create_task(input("Buy milk", "2%", "u123"))
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::Publish(_)));
    }

    #[tokio::test]
    async fn test_list_tasks_empty_is_ok() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_all().times(1).returning(|| Ok(vec![]));

        let service = TaskService::new(repo, Arc::new(MockTaskEventPublisher::new()));
        assert!(service.list_tasks().await.unwrap().is_empty());
    }
}
