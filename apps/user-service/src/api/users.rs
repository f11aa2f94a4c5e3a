//! Wires the users domain to the shared MongoDB database.

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    handlers::router(UserService::new(repository))
}
