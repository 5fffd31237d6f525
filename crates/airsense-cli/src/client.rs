//! HTTP client for the AirSense server.

use airsense_core::{HealthProfile, RankedRoutes};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /v1/trips/plan-safe-route`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSafeRouteRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub horizon: String,
    pub health_profile: HealthProfile,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<RankedRoutes>,
}

/// Client for the AirSense REST API.
pub struct AirSenseClient {
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}

impl AirSenseClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn plan_url(&self) -> String {
        format!("{}/v1/trips/plan-safe-route", self.base_url)
    }

    /// Plan a trip and return the server's JSON reply untouched.
    pub async fn plan_safe_route_raw(&self, request: &PlanSafeRouteRequest) -> Result<Value> {
        let response = self
            .client
            .post(self.plan_url())
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Server returned a non-JSON reply ({status})"))?;
        Ok(body)
    }

    /// Plan a trip and decode the ranked routes.
    pub async fn plan_safe_route(&self, request: &PlanSafeRouteRequest) -> Result<RankedRoutes> {
        let body = self.plan_safe_route_raw(request).await?;
        decode_ranking(body)
    }
}

/// Unwrap a `{status, data}` reply, turning `status: error` into an error.
pub fn decode_ranking(body: Value) -> Result<RankedRoutes> {
    let envelope: ApiEnvelope =
        serde_json::from_value(body).context("Unexpected response shape")?;
    if envelope.status != "success" {
        anyhow::bail!(
            "Server error: {}",
            envelope.message.as_deref().unwrap_or("unknown error")
        );
    }
    envelope
        .data
        .ok_or_else(|| anyhow::anyhow!("Response is missing ranking data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_health_flags() {
        let request = PlanSafeRouteRequest {
            start_lat: 28.6,
            start_lon: 77.2,
            end_lat: 28.7,
            end_lon: 77.3,
            horizon: "12h".into(),
            health_profile: HealthProfile {
                asthma: true,
                child: false,
                elderly: false,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["horizon"], "12h");
        assert_eq!(
            value["health_profile"],
            json!({"asthma": true, "child": false, "elderly": false})
        );
    }

    #[test]
    fn decodes_success_envelope() {
        let ranked = decode_ranking(json!({
            "status": "success",
            "data": {"best_route_id": null, "routes": [], "warnings": [{"kind": "no_route_alternatives"}]}
        }))
        .unwrap();
        assert!(ranked.routes.is_empty());
        assert_eq!(ranked.warnings.len(), 1);
    }

    #[test]
    fn error_envelope_becomes_error() {
        let err = decode_ranking(json!({
            "status": "error",
            "message": "Missing required coordinate bounds"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Missing required coordinate bounds"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = AirSenseClient::new("http://localhost:3000/");
        assert_eq!(client.plan_url(), "http://localhost:3000/v1/trips/plan-safe-route");
    }
}
