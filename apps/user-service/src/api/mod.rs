//! HTTP surface of the user service

pub mod health;
pub mod users;

use axum::{Router, routing::get};
use axum_helpers::server::{create_router, health_router};
use core_config::AppInfo;
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub const BANNER: &str = "User Service is running!";

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .nest("/users", users::router(state))
        .merge(health::router(state.clone()))
}

pub fn app(state: &AppState, app_info: AppInfo) -> io::Result<Router> {
    Ok(create_router::<ApiDoc>(routes(state))?.merge(health_router(app_info)))
}

async fn banner() -> &'static str {
    BANNER
}
