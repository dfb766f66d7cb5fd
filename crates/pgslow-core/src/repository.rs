//! Slow query repository over a [`SqlExecutor`].

use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use tracing::debug;

use crate::demo::demo_statements;
use crate::error::AppError;
use crate::models::SlowQueryLog;
use crate::params::{ParamResolver, QueryParams, ResolvedQuery};
use crate::statement::{Statement, build_slow_query_statement};
use crate::traits::{SqlExecutor, StatementRow};

/// Reads `pg_stat_statements` and seeds the demo schema.
///
/// Holds no mutable state: every call is independent, so one repository can
/// be cloned into every request handler. Connection acquisition is left to
/// the executor (usually a pool).
///
/// # Examples
///
/// ```ignore
/// use pgslow_core::{QueryParams, StatsRepository};
/// use pgslow_db::PgExecutor;
///
/// let repo = StatsRepository::new(PgExecutor::new(pool));
/// let logs = repo.get(&QueryParams::default()).await?;
/// ```
#[derive(Clone)]
pub struct StatsRepository<E> {
    executor: E,
    resolver: ParamResolver,
    timeout: Option<Duration>,
}

impl<E: SqlExecutor> StatsRepository<E> {
    /// Creates a repository with an unbounded resolver and no timeout.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            resolver: ParamResolver::new(),
            timeout: None,
        }
    }

    /// Replaces the parameter resolver (e.g. to cap the page size).
    pub fn with_resolver(mut self, resolver: ParamResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Aborts any database call that runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn resolver(&self) -> &ParamResolver {
        &self.resolver
    }

    /// Validates `params` without touching the database.
    pub fn resolve(&self, params: &QueryParams) -> Result<ResolvedQuery, AppError> {
        self.resolver.resolve(params)
    }

    /// Returns one page of slow query logs.
    ///
    /// Resolution errors are returned before anything is executed.
    pub async fn get(&self, params: &QueryParams) -> Result<Vec<SlowQueryLog>, AppError> {
        let resolved = self.resolve(params)?;
        self.get_resolved(&resolved).await
    }

    /// Returns one page of slow query logs for an already resolved request.
    ///
    /// Rows keep the order the database returned them in. An empty page is
    /// `Ok(vec![])`, never an error.
    pub async fn get_resolved(
        &self,
        resolved: &ResolvedQuery,
    ) -> Result<Vec<SlowQueryLog>, AppError> {
        let stmt = build_slow_query_statement(resolved);
        debug!(sql = stmt.sql(), args = stmt.args().len(), "fetching slow queries");
        self.run_with_timeout(self.collect_logs(&stmt)).await
    }

    /// Runs the demo seed sequence, stopping at the first failing step.
    pub async fn demo(&self) -> Result<(), AppError> {
        self.run_with_timeout(async {
            for (name, stmt) in demo_statements() {
                debug!(step = name, "running demo step");
                self.executor
                    .execute(&stmt)
                    .await
                    .map_err(AppError::ExecutionError)?;
            }
            Ok(())
        })
        .await
    }

    /// Checks database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.run_with_timeout(async {
            self.executor.ping().await.map_err(AppError::ExecutionError)
        })
        .await
    }

    async fn collect_logs(&self, stmt: &Statement) -> Result<Vec<SlowQueryLog>, AppError> {
        let mut rows = self.executor.fetch(stmt);
        let mut logs = Vec::new();

        while let Some(row) = rows.next().await {
            let row = row.map_err(|e| {
                if logs.is_empty() {
                    AppError::ExecutionError(e)
                } else {
                    AppError::RowsError(e)
                }
            })?;
            logs.push(map_row(&row)?);
        }

        Ok(logs)
    }

    async fn run_with_timeout<T>(
        &self,
        fut: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| AppError::Timeout(limit))?,
            None => fut.await,
        }
    }
}

fn map_row<R: StatementRow>(row: &R) -> Result<SlowQueryLog, AppError> {
    Ok(SlowQueryLog {
        query: row.get_text(0).map_err(AppError::ExecutionError)?,
        total_exec_time: row.get_text(1).map_err(AppError::ExecutionError)?,
    })
}
