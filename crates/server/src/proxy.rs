//! `GET /api/omdb`: forwards the caller's query to OMDb with the
//! server-held credential so the key never reaches the browser.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

/// Upstream JSON verbatim with 200, or `{"error": "..."}` with 500.
///
/// No retry and no caching here; the caller owns both.
pub async fn omdb_proxy(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let source = state.discovery.client().source();
    match source.fetch(&params).await {
        Ok(record) => (StatusCode::OK, Json(record.into_value())).into_response(),
        Err(e) => {
            warn!(provider = source.name(), error = %e, "proxy request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
