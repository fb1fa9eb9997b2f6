use crate::common::{DatabaseError, DatabaseResult};
use mongodb::{Database, bson::doc};
use std::time::{Duration, Instant};
use tracing::debug;

/// Ping the deployment through an established handle.
///
/// Returns the round-trip time, or `HealthCheckFailed` with the driver's message.
pub async fn check_health(db: &Database) -> DatabaseResult<Duration> {
    let start = Instant::now();
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    let elapsed = start.elapsed();
    debug!(database = db.name(), elapsed_ms = elapsed.as_millis() as u64, "MongoDB ping");
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;
    use mongodb::options::ClientOptions;

    #[tokio::test]
    async fn test_unreachable_server_fails_health_check() {
        let mut options = ClientOptions::parse("mongodb://127.0.0.1:1").await.unwrap();
        options.server_selection_timeout = Some(Duration::from_millis(200));
        let client = Client::with_options(options).unwrap();

        let err = check_health(&client.database("devevent")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
    }
}
