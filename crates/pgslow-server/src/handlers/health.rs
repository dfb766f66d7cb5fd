//! Health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::warn;

use pgslow_core::SqlExecutor;

use crate::dto::{HealthResponse, ServiceStatus};
use crate::state::AppState;

/// Health check endpoint.
///
/// Returns the server health status, version and database reachability.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health_check<E: SqlExecutor + 'static>(
    State(state): State<AppState<E>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match state.stats_repo.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            ServiceStatus {
                healthy: true,
                message: None,
            },
        ),
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ServiceStatus {
                    healthy: false,
                    message: Some("Database unreachable".to_string()),
                },
            )
        }
    };

    let label = if database.healthy { "healthy" } else { "unhealthy" };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
        }),
    )
}
