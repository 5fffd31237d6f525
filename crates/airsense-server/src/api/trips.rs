//! Safe-route planning endpoint.

use airsense_core::{
    rank_routes, Coordinate, DataGapWarning, HealthProfile, Horizon, RankError, RankRequest,
    RankedRoutes,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::api::request_id::RequestId;
use crate::api::routes::error_response;
use crate::state::AppState;

const DEFAULT_HORIZON: &str = "6h";

#[derive(Debug, Deserialize)]
pub struct PlanSafeRouteRequest {
    pub start_lat: Option<f64>,
    pub start_lon: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lon: Option<f64>,
    #[serde(default)]
    pub horizon: Option<String>,
    #[serde(default)]
    pub health_profile: Option<Map<String, Value>>,
}

impl PlanSafeRouteRequest {
    /// Resolve the body into an engine request. Errors carry the message
    /// returned to the caller.
    pub fn into_rank_request(self) -> Result<RankRequest, RankError> {
        let (Some(start_lat), Some(start_lon), Some(end_lat), Some(end_lon)) =
            (self.start_lat, self.start_lon, self.end_lat, self.end_lon)
        else {
            return Err(RankError::input("Missing required coordinate bounds"));
        };

        let horizon = Horizon::parse(self.horizon.as_deref().unwrap_or(DEFAULT_HORIZON));
        let health_profile = match self.health_profile {
            Some(flags) => HealthProfile::from_flags(&flags)?,
            None => HealthProfile::default(),
        };

        Ok(RankRequest::new(
            Coordinate::new(start_lon, start_lat),
            Coordinate::new(end_lon, end_lat),
            horizon,
            health_profile,
        ))
    }
}

pub async fn plan_safe_route(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<PlanSafeRouteRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let request = match payload.into_rank_request() {
        Ok(request) => request,
        Err(err) => return rank_error_response(err),
    };

    let request_id = request_id.map(|Extension(id)| id.0);
    let routes = state.osrm(request_id.clone());
    let forecasts = state.forecast(request_id);

    match rank_routes(&routes, &forecasts, &request, state.rules()).await {
        Ok(ranked) => {
            log_ranking(&ranked, request.horizon);
            (
                StatusCode::OK,
                Json(json!({
                    "status": "success",
                    "data": ranked,
                })),
            )
        }
        Err(err) => rank_error_response(err),
    }
}

fn rank_error_response(err: RankError) -> (StatusCode, Json<Value>) {
    match err {
        RankError::Input(message) => error_response(StatusCode::BAD_REQUEST, message),
        RankError::Upstream(err) => {
            tracing::error!("Upstream failure while ranking routes: {}", err);
            error_response(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

fn log_ranking(ranked: &RankedRoutes, horizon: Horizon) {
    for warning in &ranked.warnings {
        match warning {
            DataGapWarning::NoRouteAlternatives => {
                tracing::warn!("Directions service returned no alternatives")
            }
            DataGapWarning::EmptyForecastSnapshot => {
                tracing::warn!("Forecast snapshot is empty; exposure scored as zero")
            }
            DataGapWarning::UnmatchedSegments { route_id, count } => {
                tracing::warn!("Route {} has {} segments without a sensor match", route_id, count)
            }
        }
    }
    tracing::info!(
        routes = ranked.routes.len(),
        best_route_id = ?ranked.best_route_id,
        horizon = horizon.label(),
        "Ranked route alternatives"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(value: Value) -> PlanSafeRouteRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_coordinate_is_rejected() {
        let err = body(json!({"start_lat": 28.6, "start_lon": 77.2, "end_lat": 28.7}))
            .into_rank_request()
            .unwrap_err();
        assert_eq!(err, RankError::input("Missing required coordinate bounds"));
    }

    #[test]
    fn horizon_defaults_to_six_hours() {
        let request = body(json!({
            "start_lat": 28.6, "start_lon": 77.2, "end_lat": 28.7, "end_lon": 77.3
        }))
        .into_rank_request()
        .unwrap();
        assert_eq!(request.horizon, Horizon::SixHours);
        assert_eq!(request.origin, Coordinate::new(77.2, 28.6));
        assert_eq!(request.destination, Coordinate::new(77.3, 28.7));
        assert_eq!(request.health_profile, HealthProfile::default());
    }

    #[test]
    fn unknown_horizon_means_now() {
        let request = body(json!({
            "start_lat": 28.6, "start_lon": 77.2, "end_lat": 28.7, "end_lon": 77.3,
            "horizon": "48h"
        }))
        .into_rank_request()
        .unwrap();
        assert_eq!(request.horizon, Horizon::Now);
    }

    #[test]
    fn health_flags_are_parsed() {
        let request = body(json!({
            "start_lat": 28.6, "start_lon": 77.2, "end_lat": 28.7, "end_lon": 77.3,
            "health_profile": {"child": true, "cyclist": true}
        }))
        .into_rank_request()
        .unwrap();
        assert!(request.health_profile.child);
        assert_eq!(request.health_profile.health_weight(), 1.4);
    }

    #[test]
    fn malformed_health_flag_is_an_input_error() {
        let err = body(json!({
            "start_lat": 28.6, "start_lon": 77.2, "end_lat": 28.7, "end_lon": 77.3,
            "health_profile": {"asthma": "yes"}
        }))
        .into_rank_request()
        .unwrap_err();
        assert!(matches!(err, RankError::Input(_)));
    }
}
