//! Trait definitions for the database driver seam.
//!
//! [`StatsRepository`](crate::StatsRepository) only needs three capabilities
//! from a database: execute a statement, run a query and iterate its rows,
//! and check connectivity. Abstracting them lets tests substitute an
//! in-memory double for a real connection pool.
//!
//! # Example
//!
//! ```
//! use futures::StreamExt;
//! use pgslow_core::statement::Statement;
//! use pgslow_core::traits::{SqlExecutor, StatementRow};
//!
//! // Business logic uses the trait, not a concrete pool
//! async fn first_column<E: SqlExecutor>(executor: &E, sql: &str) -> Vec<String> {
//!     let stmt = Statement::new(sql);
//!     let mut rows = executor.fetch(&stmt);
//!     let mut out = Vec::new();
//!     while let Some(Ok(row)) = rows.next().await {
//!         if let Ok(value) = row.get_text(0) {
//!             out.push(value);
//!         }
//!     }
//!     out
//! }
//! ```

use std::future::Future;

use futures::stream::BoxStream;

use crate::statement::Statement;

/// A single result row.
pub trait StatementRow: Send {
    /// Reads column `index` (zero-based) as text.
    fn get_text(&self, index: usize) -> Result<String, sqlx::Error>;
}

/// Executes statements against a database.
///
/// Implementations bind [`Statement::args`] to the placeholders in
/// [`Statement::sql`]; they must never splice argument values into the text.
pub trait SqlExecutor: Send + Sync + Clone {
    /// Row type yielded by [`SqlExecutor::fetch`].
    type Row: StatementRow;

    /// Executes a statement and returns the number of affected rows.
    fn execute(&self, statement: &Statement)
    -> impl Future<Output = Result<u64, sqlx::Error>> + Send;

    /// Runs a query and streams its rows in the order the database returns them.
    ///
    /// An error before the first row means the statement itself failed; an
    /// error after some rows means the cursor failed mid-iteration.
    fn fetch<'a>(&'a self, statement: &'a Statement)
    -> BoxStream<'a, Result<Self::Row, sqlx::Error>>;

    /// Checks database connectivity.
    fn ping(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}
