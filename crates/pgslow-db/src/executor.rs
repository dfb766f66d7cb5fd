//! PostgreSQL executor backed by a sqlx connection pool.

use futures::StreamExt;
use futures::stream::BoxStream;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};
use tracing::{debug, info};

use pgslow_core::config::DbConfig;
use pgslow_core::statement::{BindValue, Statement};
use pgslow_core::traits::{SqlExecutor, StatementRow};

/// Executes [`Statement`]s on a shared [`PgPool`].
///
/// Cloning is cheap (the pool is an `Arc` internally). Each call acquires a
/// connection from the pool and releases it when the call finishes or its
/// future is dropped, which also aborts the in-flight query.
///
/// # Examples
///
/// ```no_run
/// use pgslow_core::DbConfig;
/// use pgslow_db::{PgExecutor, connect};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DbConfig::new("localhost", "postgres", "postgres", "postgres");
/// let executor = PgExecutor::new(connect(&config).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A row returned by [`PgExecutor::fetch`](SqlExecutor::fetch).
pub struct PgStatRow(PgRow);

impl StatementRow for PgStatRow {
    fn get_text(&self, index: usize) -> Result<String, sqlx::Error> {
        self.0.try_get::<String, _>(index)
    }
}

impl SqlExecutor for PgExecutor {
    type Row = PgStatRow;

    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error> {
        let result = bind_args(statement).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    fn fetch<'a>(&'a self, statement: &'a Statement) -> BoxStream<'a, Result<PgStatRow, sqlx::Error>> {
        bind_args(statement)
            .fetch(&self.pool)
            .map(|row| row.map(PgStatRow))
            .boxed()
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Binds every statement argument, in order, to its placeholder.
fn bind_args(statement: &Statement) -> Query<'_, Postgres, PgArguments> {
    statement
        .args()
        .iter()
        .fold(sqlx::query(statement.sql()), |query, arg| match arg {
            BindValue::Text(value) => query.bind(value.as_str()),
            BindValue::BigInt(value) => query.bind(*value),
        })
}

/// Builds connection options from `config`.
///
/// Credentials go through the options builder rather than a URL, so special
/// characters in the password need no escaping.
pub fn connect_options(config: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

/// Opens a connection pool for `config`.
pub async fn connect(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    debug!(?config, "Opening PostgreSQL pool");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options(config))
        .await?;

    info!(
        host = %config.host,
        database = %config.database,
        max_connections = config.max_connections,
        "Database connection established"
    );
    Ok(pool)
}
