use axum::{extract::State, http::header, response::IntoResponse};
use tracing::debug;

use crate::state::AppState;

/// Handler for `GET /`
/// Returns the resolved property as the plain-text body. Query string,
/// headers and body of the request are ignored.
pub async fn show_property(State(state): State<AppState>) -> impl IntoResponse {
    debug!(key = state.property.key(), "Serving property");
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.property.value().to_owned(),
    )
}
