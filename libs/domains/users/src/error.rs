use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Mongo's duplicate key error code.
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Name and email are required")]
    Validation,

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("No users found")]
    NoneFound,

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation => AppError::BadRequest(err.to_string()),
            UserError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            UserError::NoneFound => AppError::NotFound(err.to_string()),
            UserError::StoreUnavailable(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::StoreUnavailable(err.to_string())
    }
}

/// Whether a write failed on a unique index.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY,
        ErrorKind::Command(command) => command.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::Validation, StatusCode::BAD_REQUEST),
            (
                UserError::DuplicateEmail("a@b.c".into()),
                StatusCode::CONFLICT,
            ),
            (UserError::NoneFound, StatusCode::NOT_FOUND),
            (
                UserError::StoreUnavailable("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status(), status);
        }
    }
}
