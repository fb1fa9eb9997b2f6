//! Readiness endpoint

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health;

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check: acquires the MongoDB handle and pings it
async fn readiness_check(State(state): State<AppState>) -> Response {
    let database: HealthCheckFuture = Box::pin(async move {
        let db = state
            .connections
            .acquire()
            .await
            .map_err(|e| e.to_string())?;

        check_health(&db).await.map(|_| ()).map_err(|e| e.to_string())
    });

    run_health_checks(vec![("mongodb", database)]).await
}
