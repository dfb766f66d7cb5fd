//! Configuration types for pgslow components.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default connection pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Database connection settings.
///
/// The four identity fields (host, user, password, database name) come from
/// the environment in the server binary. The core never reads them itself;
/// it only receives an already-open executor.
#[derive(Clone, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long to wait for a pooled connection before failing.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: Duration,
}

fn default_port() -> u16 {
    DEFAULT_DB_PORT
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout() -> Duration {
    Duration::from_secs(10)
}

impl DbConfig {
    /// Creates a config with default port, pool size and acquire timeout.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
            port: default_port(),
            max_connections: default_max_connections(),
            acquire_timeout: default_acquire_timeout(),
        }
    }

    /// Checks that every required field is present.
    ///
    /// The password may be empty (trust authentication).
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("DB_HOST", &self.host),
            ("DB_USER", &self.user),
            ("DB_NAME", &self.database),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::ConfigError(format!("{} must not be empty", name)));
            }
        }
        if self.max_connections == 0 {
            return Err(AppError::ConfigError(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}
