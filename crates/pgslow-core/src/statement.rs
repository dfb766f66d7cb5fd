//! Parameterized statement construction.
//!
//! The only statement built from request data is the slow query listing.
//! User-controlled values never reach the SQL text: the filter pattern and
//! the limit/offset pair are carried as bound arguments.

use std::fmt;

use crate::params::ResolvedQuery;

/// Fixed projection and source for slow query listings.
///
/// `total_exec_time` is cast to text so the value survives without float
/// formatting loss. Ordering uses the qualified source column, since the
/// unqualified name would resolve to the text output column.
const SLOW_QUERY_SELECT: &str =
    "SELECT query, total_exec_time::text FROM public.pg_stat_statements AS s";

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    BigInt(i64),
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::BigInt(n) => write!(f, "{}", n),
        }
    }
}

/// SQL text with `$1..$n` placeholders plus the values bound to them, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    args: Vec<BindValue>,
}

impl Statement {
    /// A statement with no bound arguments.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[BindValue] {
        &self.args
    }

    /// Appends `value` to the argument list and returns its placeholder.
    fn bind(&mut self, value: BindValue) -> String {
        self.args.push(value);
        format!("${}", self.args.len())
    }
}

/// Builds the slow query listing for a resolved request.
///
/// Clauses are appended in a fixed order: the optional prefix filter on
/// `query`, the `ORDER BY` on total execution time, then `LIMIT`/`OFFSET`.
///
/// # Examples
///
/// ```
/// use pgslow_core::params::{QueryParams, resolve_params};
/// use pgslow_core::statement::{BindValue, build_slow_query_statement};
///
/// let resolved = resolve_params(&QueryParams::default()).unwrap();
/// let stmt = build_slow_query_statement(&resolved);
/// assert!(stmt.sql().ends_with("ORDER BY s.total_exec_time desc LIMIT $1 OFFSET $2"));
/// assert_eq!(stmt.args(), &[BindValue::BigInt(50), BindValue::BigInt(0)]);
/// ```
pub fn build_slow_query_statement(resolved: &ResolvedQuery) -> Statement {
    let mut stmt = Statement::new(SLOW_QUERY_SELECT);

    if let Some(query_type) = resolved.query_type() {
        let placeholder = stmt.bind(BindValue::Text(format!("{}%", query_type.as_str())));
        stmt.sql.push_str(&format!(" WHERE s.query ILIKE {}", placeholder));
    }

    stmt.sql.push_str(&format!(
        " ORDER BY s.total_exec_time {}",
        resolved.order().as_str()
    ));

    let limit = stmt.bind(BindValue::BigInt(resolved.limit()));
    let offset = stmt.bind(BindValue::BigInt(resolved.offset()));
    stmt.sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

    stmt
}
