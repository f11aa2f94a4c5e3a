//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;
use std::time::Duration;

use crate::state::AppState;

const MONGO_PING_TIMEOUT: Duration = Duration::from_secs(2);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Ready when MongoDB answers a ping and the publisher holds a live channel.
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "mongodb",
            Box::pin(async {
                database::mongodb::check_health(&state.db, MONGO_PING_TIMEOUT)
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
        ),
        (
            "publisher",
            Box::pin(async {
                if state.publisher.is_healthy() {
                    Ok(())
                } else {
                    Err(format!("publisher is {}", state.publisher.state()))
                }
            }),
        ),
    ];

    run_health_checks(checks).await
}
