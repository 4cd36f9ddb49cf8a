use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all blob store endpoints.
///
/// Every path below a namespace reaches the blob handlers, so paths with a
/// trailing slash or extra segments are rejected by the parser with 400
/// rather than falling through to a 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handler::root_handler).fallback(handler::unsupported_method),
        )
        .route(
            "/:namespace/*rest",
            get(handler::get_blob)
                .put(handler::put_blob)
                .fallback(handler::unsupported_method),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
