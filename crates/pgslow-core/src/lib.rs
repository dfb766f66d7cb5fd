//! pgslow Core - parameter resolution, statement building and repository logic.
//!
//! This crate turns untrusted request parameters into a bounded,
//! parameterized statement against `pg_stat_statements` and maps the result
//! rows into [`SlowQueryLog`] records.
//!
//! - **Resolution**: [`ParamResolver`] validates and defaults [`QueryParams`]
//! - **Statements**: [`build_slow_query_statement`] binds every user value
//! - **Repository**: [`StatsRepository`] runs listings and the demo seed
//! - **Traits**: [`SqlExecutor`] is the driver seam, so tests run without a database
//!
//! # Example
//!
//! ```ignore
//! use pgslow_core::{ParamResolver, QueryParams, StatsRepository};
//!
//! let repo = StatsRepository::new(executor)
//!     .with_resolver(ParamResolver::with_max_page_size(500));
//! let logs = repo.get(&QueryParams { page: 1, ..Default::default() }).await?;
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod params;
pub mod repository;
pub mod statement;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Configuration
pub use config::DbConfig;

// Error handling
pub use error::AppError;

// Domain models
pub use models::SlowQueryLog;

// Parameter resolution
pub use params::{
    DEFAULT_PAGE_SIZE, OrderDirection, ParamResolver, QueryParams, QueryType, ResolvedQuery,
    resolve_params,
};

// Statement building
pub use statement::{BindValue, Statement, build_slow_query_statement};

// Repository
pub use repository::StatsRepository;

// Traits for dependency injection
pub use traits::{SqlExecutor, StatementRow};
