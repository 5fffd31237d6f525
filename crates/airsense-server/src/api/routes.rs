//! REST API routes.

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::{air_quality, request_id, trips};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/trips/plan-safe-route", post(trips::plan_safe_route))
        .route("/v1/air-quality/nearest", get(air_quality::nearest_sensor))
        .layer(middleware::from_fn(request_id::ensure_request_id))
}

/// `{"status": "error", "message": ...}` with the given status code.
pub(crate) fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "status": "error",
            "message": message.into(),
        })),
    )
}
