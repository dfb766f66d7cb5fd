//! Response DTOs for API endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use pgslow_core::SlowQueryLog;

// =============================================================================
// Health
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("healthy" or "unhealthy")
    pub status: String,
    /// Server version
    pub version: String,
    /// Database connectivity status
    pub database: ServiceStatus,
}

/// Status of an individual service component.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// Whether the service is reachable
    pub healthy: bool,
    /// Optional message (e.g., error details)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Slow queries
// =============================================================================

/// One `pg_stat_statements` row.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SlowQueryLogDto {
    /// Normalized statement text
    #[schema(example = "SELECT * FROM users WHERE first_name ILIKE $1")]
    pub query: String,
    /// Total execution time in milliseconds, as text
    #[schema(example = "12.345")]
    pub total_exec_time: String,
}

impl From<SlowQueryLog> for SlowQueryLogDto {
    fn from(log: SlowQueryLog) -> Self {
        Self {
            query: log.query,
            total_exec_time: log.total_exec_time,
        }
    }
}
