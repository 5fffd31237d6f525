//! API routes for the AirSense server.

pub mod air_quality;
pub mod request_id;
mod routes;
pub mod trips;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}
