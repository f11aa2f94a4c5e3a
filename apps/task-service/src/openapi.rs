//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task Service",
        version = "0.1.0",
        description = "Task records; every created task is announced on the task-created queue"
    ),
    servers(
        (url = "http://localhost:3002", description = "Local development server")
    ),
    nest(
        (path = "/tasks", api = domain_tasks::ApiDoc)
    )
)]
pub struct ApiDoc;
