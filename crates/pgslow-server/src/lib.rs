//! pgslow Server - REST API for PostgreSQL slow query statistics
//!
//! This crate provides an HTTP API over `pg_stat_statements`:
//!
//! - **Slow queries**: `GET /slow-queries` with paging, prefix filter and sort
//! - **Demo**: `GET /demo/init` seeds a small schema to populate the view
//! - **Health**: `GET /health` reports database reachability
//!
//! # API Documentation
//!
//! When running the server, the OpenAPI document is served at
//! `/api-docs/openapi.json`.

pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod state;

pub use cache::ResponseCache;
pub use config::ServerConfig;
pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
