use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    ErrorResponse, JsonOrForm,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::events::TaskEventPublisher;
use crate::models::{CreateTask, Task};
use crate::repository::TaskRepository;
use crate::service::{TaskCreation, TaskService};

pub const CREATED_MESSAGE: &str = "Task created successfully";
pub const DEGRADED_MESSAGE: &str =
    "Task saved, but the task-created notification could not be sent";

/// Body of `POST /tasks` responses that carry the stored task.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TaskResponse {
    pub success: bool,
    pub message: String,
    pub task: Task,
}

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task),
    components(
        schemas(Task, CreateTask, TaskResponse, ErrorResponse),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Tasks", description = "Task records; creation publishes a task-created event")
    )
)]
pub struct ApiDoc;

/// Routes for the tasks collection, to be nested under `/tasks`.
pub fn router<R, P>(service: TaskService<R, P>) -> Router
where
    R: TaskRepository + 'static,
    P: TaskEventPublisher + ?Sized + 'static,
{
    Router::new()
        .route("/", get(list_tasks::<R, P>).post(create_task::<R, P>))
        .with_state(Arc::new(service))
}

/// List every stored task
#[utoipa::path(
    get,
    path = "",
    tag = "Tasks",
    responses(
        (status = 200, description = "All stored tasks, possibly none", body = Vec<Task>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository, P: TaskEventPublisher + ?Sized>(
    State(service): State<Arc<TaskService<R, P>>>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks))
}

/// Create a task and publish a task-created event
///
/// Accepts JSON or form-encoded bodies.
#[utoipa::path(
    post,
    path = "",
    tag = "Tasks",
    request_body(
        content(
            (CreateTask = "application/json"),
            (CreateTask = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 201, description = "Task stored and event published", body = TaskResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, description = "Task stored but the event could not be published", body = TaskResponse)
    )
)]
async fn create_task<R: TaskRepository, P: TaskEventPublisher + ?Sized>(
    State(service): State<Arc<TaskService<R, P>>>,
    JsonOrForm(input): JsonOrForm<CreateTask>,
) -> TaskResult<Response> {
    let response = match service.create_task(input).await? {
        TaskCreation::Created(task) => (
            StatusCode::CREATED,
            Json(TaskResponse {
                success: true,
                message: CREATED_MESSAGE.to_string(),
                task,
            }),
        ),
        TaskCreation::Degraded(task) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(TaskResponse {
                success: false,
                message: DEGRADED_MESSAGE.to_string(),
                task,
            }),
        ),
    };

    Ok(response.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::events::MockTaskEventPublisher;
    use crate::models::NewTask;
    use crate::repository::MockTaskRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use messaging::{MessagingError, PublishOutcome};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app(repo: MockTaskRepository, publisher: MockTaskEventPublisher) -> Router {
        router(TaskService::new(repo, Arc::new(publisher)))
    }

    fn storing_repository() -> MockTaskRepository {
        let mut repo = MockTaskRepository::new();
        repo.expect_save().times(1).returning(|new| Ok(Task::new(new)));
        repo
    }

    fn publisher(outcome: PublishOutcome) -> MockTaskEventPublisher {
        let mut publisher = MockTaskEventPublisher::new();
        publisher
            .expect_publish_task_created()
            .times(1)
            .returning(move |_| Ok(outcome));
        publisher
    }

    #[tokio::test]
    async fn test_create_returns_201_with_task() {
        let app = app(storing_repository(), publisher(PublishOutcome::Published));

        let response = app
            .oneshot(post_json(
                json!({"title": "Buy milk", "description": "2%", "userId": "u123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], CREATED_MESSAGE);
        assert_eq!(body["task"]["title"], "Buy milk");
        assert_eq!(body["task"]["userId"], "u123");
        assert!(body["task"]["_id"].is_string());
        assert!(body["task"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_create_accepts_form_body() {
        let app = app(storing_repository(), publisher(PublishOutcome::Published));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("title=Buy+milk&description=2%25&userId=u123"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["task"]["description"], "2%");
    }

    #[tokio::test]
    async fn test_create_with_empty_title_returns_400() {
        let mut repo = MockTaskRepository::new();
        repo.expect_save().never();
        let mut publisher = MockTaskEventPublisher::new();
        publisher.expect_publish_task_created().never();

        let response = app(repo, publisher)
            .oneshot(post_json(
                json!({"title": "", "description": "desc", "userId": "u1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing required field(s): title");
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_names_them() {
        let mut repo = MockTaskRepository::new();
        repo.expect_save().never();

        let response = app(repo, MockTaskEventPublisher::new())
            .oneshot(post_json(json!({"title": "only a title"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Missing required field(s): description, userId"
        );
    }

    #[tokio::test]
    async fn test_create_when_publisher_unavailable_returns_503_with_task() {
        let app = app(storing_repository(), publisher(PublishOutcome::Unavailable));

        let response = app
            .oneshot(post_json(
                json!({"title": "Buy milk", "description": "2%", "userId": "u123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], DEGRADED_MESSAGE);
        assert_eq!(body["task"]["title"], "Buy milk");
    }

    #[tokio::test]
    async fn test_create_store_failure_returns_generic_500() {
        let mut repo = MockTaskRepository::new();
        repo.expect_save()
            .returning(|_| Err(TaskError::StoreUnavailable("socket closed at 10.1.2.3".into())));
        let mut publisher = MockTaskEventPublisher::new();
        publisher.expect_publish_task_created().never();

        let response = app(repo, publisher)
            .oneshot(post_json(
                json!({"title": "Buy milk", "description": "2%", "userId": "u123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_create_send_failure_returns_500() {
        let mut publisher = MockTaskEventPublisher::new();
        publisher
            .expect_publish_task_created()
            .returning(|_| Err(MessagingError::send("task_created", "connection reset")));

        let response = app(storing_repository(), publisher)
            .oneshot(post_json(
                json!({"title": "Buy milk", "description": "2%", "userId": "u123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_list_empty_returns_200_with_empty_array() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_all().returning(|| Ok(vec![]));

        let response = app(repo, MockTaskEventPublisher::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_list_returns_stored_tasks() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_all().returning(|| {
            Ok(vec![Task::new(NewTask {
                title: "Buy milk".into(),
                description: "2%".into(),
                user_id: "u123".into(),
            })])
        });

        let response = app(repo, MockTaskEventPublisher::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["userId"], "u123");
    }

    #[tokio::test]
    async fn test_list_store_failure_returns_500() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_all()
            .returning(|| Err(TaskError::StoreUnavailable("down".into())));

        let response = app(repo, MockTaskEventPublisher::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
