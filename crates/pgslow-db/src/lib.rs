//! pgslow DB - PostgreSQL executor for the slow query repository
//!
//! This crate provides the sqlx-backed implementation of
//! [`pgslow_core::SqlExecutor`].
//!
//! # Overview
//!
//! The main components are:
//! - [`PgExecutor`] - Statement execution and row streaming over a `PgPool`
//! - [`connect`] - Pool construction from a [`pgslow_core::DbConfig`]

mod executor;

pub use executor::{PgExecutor, PgStatRow, connect, connect_options};
