//! Readiness endpoint

use axum::{Json, Router, routing::get};
use axum_helpers::ReadyResponse;

/// Create the readiness router
pub fn router() -> Router {
    Router::new().route("/ready", get(readiness_check))
}

/// Ready as soon as the listener is up; no connections are held between requests.
async fn readiness_check() -> Json<ReadyResponse> {
    Json(ReadyResponse::ready())
}
