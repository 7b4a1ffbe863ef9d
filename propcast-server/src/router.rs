use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the route table. `GET /` is the only route; anything else falls
/// through to axum's 404/405 handling.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::show_property))
        .layer(TraceLayer::new_for_http()) // Log requests/responses
        .with_state(state)
}
