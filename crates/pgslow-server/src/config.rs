use std::time::Duration;

use clap::Parser;

use pgslow_core::{DbConfig, ParamResolver};

/// Server configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug, Clone)]
#[command(name = "pgslow-server")]
#[command(author, version, about = "REST API for PostgreSQL slow query statistics")]
pub struct ServerConfig {
    /// PostgreSQL host
    #[arg(long, env = "DB_HOST")]
    pub db_host: String,

    /// PostgreSQL user
    #[arg(long, env = "DB_USER")]
    pub db_user: String,

    /// PostgreSQL password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    /// PostgreSQL database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: String,

    /// PostgreSQL port
    #[arg(long, env = "DB_PORT", default_value = "5432")]
    pub db_port: u16,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: u32,

    /// Server port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Abort database calls that run longer than this many seconds (0 = no limit)
    #[arg(long, env = "QUERY_TIMEOUT_SECS", default_value = "30")]
    pub query_timeout_secs: u64,

    /// Reject page_size values above this limit (unset = unbounded)
    #[arg(long, env = "MAX_PAGE_SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_page_size: Option<u32>,

    /// How long slow query responses stay cached, in seconds (0 = disabled)
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "1800")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached responses
    #[arg(long, env = "CACHE_MAX_ENTRIES", default_value = "1000")]
    pub cache_max_entries: u64,
}

impl ServerConfig {
    /// Database settings for the connection pool.
    pub fn db_config(&self) -> DbConfig {
        let mut config = DbConfig::new(
            &self.db_host,
            &self.db_user,
            &self.db_password,
            &self.db_name,
        );
        config.port = self.db_port;
        config.max_connections = self.db_max_connections;
        config
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query_timeout_secs > 0).then(|| Duration::from_secs(self.query_timeout_secs))
    }

    pub fn resolver(&self) -> ParamResolver {
        match self.max_page_size {
            Some(max) => ParamResolver::with_max_page_size(max),
            None => ParamResolver::new(),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
