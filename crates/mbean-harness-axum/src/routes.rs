//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::bootstrap::AxumContext;
use crate::handlers;
use crate::state::AppState;

/// Create the control-service router.
///
/// Paths are fixed and unversioned; integration tests address them
/// directly.
pub fn create_router(ctx: AxumContext) -> Router {
    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/health", get(health_check))
        // Registration
        .route("/cat", post(handlers::cats::register))
        .route("/cat_batch", post(handlers::cats::register_batch))
        .route(
            "/composite_data_cat",
            post(handlers::cats::register_composite),
        )
        .route(
            "/exceptional_cat",
            post(handlers::cats::register_exceptional),
        )
        .route("/custom_cat", post(handlers::cats::register_custom))
        // Cleanup
        .route("/clear", put(handlers::cats::clear))
        // Introspection
        .route("/beans", get(handlers::beans::list))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
