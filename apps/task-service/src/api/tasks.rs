//! Wires the tasks domain to the shared MongoDB database and publisher.

use axum::Router;
use domain_tasks::{MongoTaskRepository, TaskService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoTaskRepository::new(&state.db);
    let service = TaskService::new(repository, state.publisher.clone());

    handlers::router(service)
}
