//! Domain models.

use serde::{Deserialize, Serialize};

/// One row of the slow query listing.
///
/// Built fresh for each request from a `pg_stat_statements` row and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlowQueryLog {
    /// Normalized statement text as reported by the statistics view.
    pub query: String,
    /// Total execution time in milliseconds, kept as the database's text rendering.
    pub total_exec_time: String,
}

impl SlowQueryLog {
    pub fn new(query: impl Into<String>, total_exec_time: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            total_exec_time: total_exec_time.into(),
        }
    }
}
