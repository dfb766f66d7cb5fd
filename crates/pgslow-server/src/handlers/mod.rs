//! HTTP request handlers for API endpoints.

pub mod demo;
pub mod health;
pub mod slow_queries;
