//! Demo seeding endpoint.

use axum::extract::State;
use tracing::{error, info};

use pgslow_core::SqlExecutor;

use crate::error::ApiError;
use crate::state::AppState;

/// Seed the demo schema.
///
/// Enables `pg_stat_statements`, recreates the `users` table and runs a few
/// statements against it so the statistics view has something to show.
#[utoipa::path(
    get,
    path = "/demo/init",
    responses(
        (status = 200, description = "Demo schema seeded", body = String),
        (status = 500, description = "A seeding step failed"),
    ),
    tag = "demo"
)]
pub async fn init_demo<E: SqlExecutor + 'static>(
    State(state): State<AppState<E>>,
) -> Result<&'static str, ApiError> {
    state
        .until_shutdown(async {
            state.stats_repo.demo().await.map_err(|e| {
                error!(error = %e, "Demo seeding failed");
                ApiError::from(e)
            })
        })
        .await?;

    info!("Demo schema seeded");
    Ok("init demo")
}
