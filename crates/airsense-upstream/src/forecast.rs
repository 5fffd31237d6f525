//! Air-quality forecast service client.

use airsense_core::{ForecastRecord, ForecastSource, UpstreamError};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_FORECAST_URL: &str = "http://localhost:5000";
const FORECAST_PATH: &str = "/api/maps/forecast";

/// HTTP client for the per-node AQI forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) auth_token: Option<String>,
    pub(crate) request_id: Option<String>,
}

/// The forecast service wraps records as `{status, count, data}`; a bare
/// array is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ForecastPayload {
    Envelope(ForecastEnvelope),
    Records(Vec<ForecastRecord>),
}

#[derive(Debug, Deserialize)]
struct ForecastEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Vec<ForecastRecord>,
}

/// Decode a forecast response body.
pub fn parse_forecast_payload(body: &str) -> Result<Vec<ForecastRecord>, UpstreamError> {
    let payload: ForecastPayload = serde_json::from_str(body)
        .map_err(|err| UpstreamError::Forecast(format!("failed to parse forecast: {err}")))?;
    match payload {
        ForecastPayload::Records(records) => Ok(records),
        ForecastPayload::Envelope(envelope) if envelope.status == "success" => Ok(envelope.data),
        ForecastPayload::Envelope(envelope) => Err(UpstreamError::Forecast(
            envelope
                .message
                .unwrap_or_else(|| format!("status {}", envelope.status)),
        )),
    }
}

impl ForecastClient {
    /// Create a new forecast client with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            request_id: None,
        }
    }

    /// Set the bearer token sent with every forecast request.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.set_auth_token(token);
        self
    }

    /// Copy of this client that forwards `request_id` as `X-Request-ID`.
    pub fn with_request_id(&self, request_id: Option<String>) -> Self {
        let mut client = self.clone();
        client.request_id = request_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        client
    }

    pub fn forecast_url(&self) -> String {
        format!("{}{}", self.base_url, FORECAST_PATH)
    }

    fn apply_headers(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = self.auth_token.as_deref() {
            request = request.bearer_auth(token);
        }
        match self.request_id.as_deref() {
            Some(value) if !value.is_empty() => request.header("X-Request-ID", value),
            _ => request,
        }
    }
}

impl ForecastSource for ForecastClient {
    async fn fetch_forecast_snapshot(&self) -> Result<Vec<ForecastRecord>, UpstreamError> {
        let url = self.forecast_url();
        tracing::debug!("Fetching forecast snapshot from {}", url);

        let response = self
            .apply_headers(self.client.get(&url))
            .send()
            .await
            .map_err(|err| UpstreamError::Forecast(format!("request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| UpstreamError::Forecast(format!("failed to read response: {err}")))?;

        if !status.is_success() {
            let detail = match parse_forecast_payload(&body) {
                Err(UpstreamError::Forecast(message)) => message,
                _ => body.chars().take(200).collect(),
            };
            return Err(UpstreamError::Forecast(format!(
                "forecast request failed: {status} {detail}"
            )));
        }

        let records = parse_forecast_payload(&body)?;
        tracing::debug!("Forecast snapshot covers {} nodes", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_envelope() {
        let body = r##"{
            "status": "success",
            "count": 2,
            "data": [
                {"node_id": 1, "lat": 28.61, "lon": 77.20, "aqi_now": 88.0, "risk_now": "Medium",
                 "color_now": "#f97316", "aqi_6h": 95.2, "aqi_12h": 101.0, "aqi_24h": 140.3,
                 "wind_direction": 225.0},
                {"node_id": 2, "lat": 28.65, "lon": 77.25, "aqi_now": 40.0}
            ]
        }"##;
        let records = parse_forecast_payload(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].aqi_24h, Some(140.3));
        assert_eq!(records[0].wind_direction_deg(), 225.0);
        assert_eq!(records[1].aqi_6h, None);
    }

    #[test]
    fn parses_bare_array() {
        let body = r#"[{"node_id": 5, "lat": 1.0, "lon": 2.0, "aqi_now": 12.5}]"#;
        let records = parse_forecast_payload(body).unwrap();
        assert_eq!(records[0].node_id, 5);
    }

    #[test]
    fn error_envelope_carries_message() {
        let body = r#"{"status": "error", "message": "joblib and numpy are required"}"#;
        assert_eq!(
            parse_forecast_payload(body).unwrap_err(),
            UpstreamError::Forecast("joblib and numpy are required".into())
        );
    }

    #[test]
    fn garbage_is_a_forecast_error() {
        assert!(matches!(
            parse_forecast_payload("<html>502</html>"),
            Err(UpstreamError::Forecast(_))
        ));
    }

    #[test]
    fn blank_auth_token_is_dropped() {
        let client = ForecastClient::with_client(Client::new(), DEFAULT_FORECAST_URL);
        assert!(client.clone().with_auth_token(Some(" ".into())).auth_token.is_none());
        let client = client.with_auth_token(Some(" secret ".into()));
        assert_eq!(client.auth_token.as_deref(), Some("secret"));
        // Request-scoped copies keep the token.
        let scoped = client.with_request_id(Some("req-1".into()));
        assert_eq!(scoped.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn forecast_url_joins_path() {
        let client = ForecastClient::with_client(Client::new(), "http://forecast.local/");
        assert_eq!(client.forecast_url(), "http://forecast.local/api/maps/forecast");
    }
}
