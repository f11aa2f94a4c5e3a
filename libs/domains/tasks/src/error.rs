use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use messaging::MessagingError;
use thiserror::Error;

use crate::models::missing_fields_message;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{}", missing_fields_message(.0))]
    Validation(Vec<&'static str>),

    #[error("Task store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Failed to publish task event: {0}")]
    Publish(#[from] MessagingError),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(_) => AppError::BadRequest(err.to_string()),
            TaskError::StoreUnavailable(_) | TaskError::Publish(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for TaskError {
    fn from(err: mongodb::error::Error) -> Self {
        TaskError::StoreUnavailable(err.to_string())
    }
}
