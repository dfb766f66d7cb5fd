//! Slow query listing endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::{debug, error, warn};

use pgslow_core::{QueryParams, SqlExecutor};

use crate::dto::SlowQueryLogDto;
use crate::error::ApiError;
use crate::state::AppState;

/// List slow queries.
///
/// Returns one page of `pg_stat_statements` rows sorted by total execution time.
#[utoipa::path(
    get,
    path = "/slow-queries",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page number (default: 0)"),
        ("page_size" = Option<u32>, Query, description = "Rows per page (default: 50)"),
        ("query_type" = Option<String>, Query, description = "Statement prefix filter: select, insert, update or delete"),
        ("order_by" = Option<String>, Query, description = "Sort by total execution time: asc or desc (default: desc)"),
    ),
    responses(
        (status = 200, description = "Slow query logs", body = [SlowQueryLogDto]),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Database error"),
        (status = 503, description = "Query timed out"),
    ),
    tag = "slow-queries"
)]
pub async fn list_slow_queries<E: SqlExecutor + 'static>(
    State(state): State<AppState<E>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<Vec<SlowQueryLogDto>>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        warn!(error = %rejection, "Rejected slow query parameters");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let resolved = state.stats_repo.resolve(&params).map_err(|e| {
        warn!(error = %e, "Invalid slow query parameters");
        ApiError::from(e)
    })?;

    if let Some(page) = state.cache.get(&resolved).await {
        debug!(?resolved, "Cache hit for slow queries");
        return Ok(Json(to_dtos(&page)));
    }

    let logs = state
        .until_shutdown(async {
            state.stats_repo.get_resolved(&resolved).await.map_err(|e| {
                error!(error = %e, "Failed to fetch slow queries");
                ApiError::from(e)
            })
        })
        .await?;

    let page = Arc::new(logs);
    state.cache.insert(resolved, page.clone()).await;

    Ok(Json(to_dtos(&page)))
}

fn to_dtos(page: &[pgslow_core::SlowQueryLog]) -> Vec<SlowQueryLogDto> {
    page.iter().cloned().map(SlowQueryLogDto::from).collect()
}
