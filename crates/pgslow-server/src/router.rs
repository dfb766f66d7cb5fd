//! Router configuration and route composition.

use std::time::Duration;

use axum::http::Method;
use axum::{Json, Router, routing::get};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use pgslow_core::SqlExecutor;

use crate::handlers::{demo, health, slow_queries};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
pub fn create_router<E: SqlExecutor + 'static>(state: AppState<E>) -> Router {
    let api_routes = Router::new()
        .route("/slow-queries", get(slow_queries::list_slow_queries::<E>))
        .route("/demo/init", get(demo::init_demo::<E>))
        .route("/health", get(health::health_check::<E>));

    Router::new()
        .merge(api_routes)
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        // Middleware layers (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .with_state(state)
}

/// Read-only API: any origin may issue GET requests.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([axum::http::header::ACCEPT])
        .allow_origin(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600))
}
