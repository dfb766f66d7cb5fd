//! pgslow REST API Server
//!
//! This binary starts the pgslow API server, exposing slow query statistics
//! from `pg_stat_statements` and a demo seeding route.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pgslow_core::StatsRepository;
use pgslow_db::{PgExecutor, connect};

use pgslow_server::{AppState, ResponseCache, ServerConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let config = ServerConfig::parse();
    let db_config = config.db_config();
    db_config.validate()?;

    // Connect to database
    info!("Connecting to database...");
    let pool = connect(&db_config)
        .await
        .context("Failed to connect to database")?;
    let executor = PgExecutor::new(pool);

    let mut stats_repo = StatsRepository::new(executor.clone()).with_resolver(config.resolver());
    if let Some(timeout) = config.query_timeout() {
        stats_repo = stats_repo.with_timeout(timeout);
    }

    let cache = ResponseCache::new(config.cache_ttl(), config.cache_max_entries);
    if cache.is_enabled() {
        info!(
            ttl_secs = config.cache_ttl_secs,
            "Slow query response cache enabled"
        );
    }

    // Create shutdown token for graceful shutdown
    let shutdown_token = CancellationToken::new();

    // Create application state and build router
    let app_state = AppState::new(stats_repo, cache, shutdown_token.clone());
    let app = create_router(app_state);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid address")?;

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Starting pgslow API server on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_token))
        .await
        .context("Server error")?;

    executor.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
    shutdown_token.cancel();
}
