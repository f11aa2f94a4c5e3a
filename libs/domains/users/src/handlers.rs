use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{
    ErrorResponse, JsonOrForm,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, User};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const CREATED_MESSAGE: &str = "User added successfully";
pub const FETCHED_MESSAGE: &str = "Users fetched successfully";

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserCreatedResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserListResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub data: Vec<User>,
}

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user),
    components(
        schemas(User, CreateUser, UserCreatedResponse, UserListResponse, ErrorResponse),
        responses(
            BadRequestResponse,
            ConflictResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User records")
    )
)]
pub struct ApiDoc;

/// Routes for the users collection, to be nested under `/users`.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/", get(list_users::<R>).post(create_user::<R>))
        .with_state(Arc::new(service))
}

/// List every user
///
/// Responds 404 rather than an empty list when no users exist.
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All stored users", body = UserListResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<UserListResponse>> {
    let users = service.list_users().await?;

    Ok(Json(UserListResponse {
        success: true,
        message: FETCHED_MESSAGE.to_string(),
        count: users.len(),
        data: users,
    }))
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body(
        content(
            (CreateUser = "application/json"),
            (CreateUser = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 201, description = "User stored", body = UserCreatedResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonOrForm(input): JsonOrForm<CreateUser>,
) -> UserResult<(StatusCode, Json<UserCreatedResponse>)> {
    let user = service.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            success: true,
            message: CREATED_MESSAGE.to_string(),
            user,
        }),
    ))
}
