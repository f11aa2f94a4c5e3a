//! HTTP surface of the task service

pub mod health;
pub mod tasks;

use axum::{Router, routing::get};
use axum_helpers::server::{create_router, health_router};
use core_config::AppInfo;
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub const BANNER: &str = "Task Service is running!";

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .nest("/tasks", tasks::router(state))
        .merge(health::router(state.clone()))
}

/// Full application: API routes, docs, middleware and `/health`.
pub fn app(state: &AppState, app_info: AppInfo) -> io::Result<Router> {
    Ok(create_router::<ApiDoc>(routes(state))?.merge(health_router(app_info)))
}

async fn banner() -> &'static str {
    BANNER
}
