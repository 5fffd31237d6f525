//! Point air-quality lookup against the latest forecast snapshot.

use airsense_core::{Coordinate, ForecastSource, Horizon, RiskTier, SensorSnapshot};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::api::request_id::RequestId;
use crate::api::routes::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub horizon: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NearestSensorResponse {
    pub node_id: i64,
    pub lat: f64,
    pub lon: f64,
    pub distance_m: f64,
    pub horizon: Horizon,
    pub aqi: f64,
    pub risk: RiskTier,
    pub color: String,
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub async fn nearest_sensor(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
        }
    };
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return error_response(StatusCode::BAD_REQUEST, "lat and lon are required").into_response();
    };
    let point = Coordinate::new(lon, lat);
    if !point.is_valid() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("coordinate out of range: lat={lat}, lon={lon}"),
        )
        .into_response();
    }
    let horizon = query.horizon.as_deref().map(Horizon::parse).unwrap_or_default();

    let forecasts = state.forecast(request_id.map(|Extension(id)| id.0));
    let records = match forecasts.fetch_forecast_snapshot().await {
        Ok(records) => records,
        Err(err) => {
            tracing::error!("Forecast lookup failed: {}", err);
            return error_response(StatusCode::BAD_GATEWAY, err.to_string()).into_response();
        }
    };

    let snapshot = SensorSnapshot::new(&records);
    let Some(found) = snapshot.nearest(&point) else {
        tracing::warn!("Forecast snapshot is empty");
        return error_response(StatusCode::NOT_FOUND, "No forecast data available").into_response();
    };

    let aqi = found.record.concentration(horizon);
    let risk = RiskTier::classify(aqi, &state.rules().risk_thresholds);
    tracing::debug!(
        "Nearest sensor to {:.4}, {:.4} is node {} at {:.0} m",
        lat,
        lon,
        found.record.node_id,
        found.distance_m
    );

    let nearest = NearestSensorResponse {
        node_id: found.record.node_id,
        lat: found.record.lat,
        lon: found.record.lon,
        distance_m: round_1dp(found.distance_m),
        horizon,
        aqi: round_1dp(aqi),
        risk,
        color: risk.color().to_string(),
    };
    Json(json!({
        "status": "success",
        "data": nearest,
    }))
    .into_response()
}
