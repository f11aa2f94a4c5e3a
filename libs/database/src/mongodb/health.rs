use mongodb::{Database, bson::doc};
use std::time::{Duration, Instant};

use super::MongoError;

/// Pings `db` and returns the round-trip time.
///
/// The ping is abandoned after `timeout`; without it an unreachable server
/// holds the caller for the full server selection timeout.
///
/// # Example
/// ```ignore
/// match check_health(&db, Duration::from_secs(2)).await {
///     Ok(latency) => debug!(?latency, "MongoDB healthy"),
///     Err(e) => error!("MongoDB unhealthy: {}", e),
/// }
/// ```
pub async fn check_health(db: &Database, timeout: Duration) -> Result<Duration, MongoError> {
    let start = Instant::now();

    tokio::time::timeout(timeout, db.run_command(doc! { "ping": 1 }))
        .await
        .map_err(|_| {
            MongoError::ConnectionFailed(format!("health check timed out after {:?}", timeout))
        })?
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    Ok(start.elapsed())
}
