use std::time::Duration;

use thiserror::Error;

/// Application-wide error types.
///
/// Every error produced by the core is returned to the immediate caller.
/// The core never retries, logs, or swallows an error, and a result and an
/// error are never returned together.
///
/// # Examples
///
/// ```
/// use pgslow_core::error::AppError;
///
/// let err = AppError::invalid_argument("query_type", "bogus");
/// assert_eq!(err.to_string(), "invalid query_type: bogus");
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// A request parameter failed validation.
    ///
    /// Detected before any database call is made. Always recoverable by
    /// resubmitting corrected parameters.
    #[error("invalid {field}: {value}")]
    InvalidArgument {
        /// Name of the offending parameter as it appears on the wire.
        field: &'static str,
        /// The raw value the caller sent.
        value: String,
    },

    /// Statement execution or row decoding failed.
    ///
    /// Covers connectivity failures, syntax errors, constraint violations
    /// during demo seeding, and columns that could not be read as text.
    #[error("Database error: {0}")]
    ExecutionError(#[source] sqlx::Error),

    /// The result cursor failed after rows had already been received.
    #[error("Rows error: {0}")]
    RowsError(#[source] sqlx::Error),

    /// The statement did not finish within the configured timeout.
    ///
    /// The pending query is aborted before this error is returned.
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Builds an [`AppError::InvalidArgument`] for `field` carrying `value`.
    pub fn invalid_argument(field: &'static str, value: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            field,
            value: value.into(),
        }
    }
}
