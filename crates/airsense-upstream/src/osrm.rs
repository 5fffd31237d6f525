//! OSRM directions client.

use airsense_core::{Coordinate, RouteCandidate, RouteSource, UpstreamError};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_PROFILE: &str = "driving";

/// HTTP client for the OSRM `route` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) profile: String,
    pub(crate) request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    #[serde(default)]
    pub geometry: OsrmGeometry,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

/// GeoJSON LineString geometry (`geometries=geojson`).
#[derive(Debug, Default, Deserialize)]
pub struct OsrmGeometry {
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

impl OsrmResponse {
    /// Convert an OSRM reply into route candidates, mapping OSRM status codes
    /// onto upstream errors.
    pub fn into_candidates(self) -> Result<Vec<RouteCandidate>, UpstreamError> {
        match self.code.as_str() {
            "Ok" => Ok(self
                .routes
                .into_iter()
                .map(|route| RouteCandidate {
                    geometry: route.geometry.coordinates,
                    distance_meters: route.distance,
                    duration_seconds: route.duration,
                })
                .collect()),
            "NoRoute" => Err(UpstreamError::NoRoute),
            code => Err(UpstreamError::Routing(format!(
                "OSRM error {}: {}",
                code,
                self.message.as_deref().unwrap_or("Unknown error")
            ))),
        }
    }
}

impl OsrmClient {
    /// Create a new OSRM client with a request timeout.
    pub fn new(
        base_url: impl Into<String>,
        profile: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(client, base_url, profile))
    }

    /// Wrap an existing HTTP client (shares its connection pool).
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile: profile.into(),
            request_id: None,
        }
    }

    /// Copy of this client that forwards `request_id` as `X-Request-ID`.
    pub fn with_request_id(&self, request_id: Option<String>) -> Self {
        let mut client = self.clone();
        client.request_id = request_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        client
    }

    pub fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url, self.profile, origin.lon, origin.lat, destination.lon, destination.lat
        )
    }

    fn apply_request_id(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.request_id.as_deref() {
            Some(value) if !value.is_empty() => request.header("X-Request-ID", value),
            _ => request,
        }
    }
}

impl RouteSource for OsrmClient {
    async fn fetch_route_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, UpstreamError> {
        let url = self.route_url(origin, destination);
        tracing::debug!("Fetching route alternatives from {}", url);

        let response = self
            .apply_request_id(self.client.get(&url).query(&[
                ("alternatives", "true"),
                ("overview", "full"),
                ("geometries", "geojson"),
            ]))
            .send()
            .await
            .map_err(|err| UpstreamError::Routing(format!("request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| UpstreamError::Routing(format!("failed to read response: {err}")))?;

        // OSRM reports NoRoute and friends with a 4xx status and a JSON body.
        match serde_json::from_str::<OsrmResponse>(&body) {
            Ok(parsed) => {
                let candidates = parsed.into_candidates()?;
                tracing::debug!("OSRM returned {} alternatives", candidates.len());
                Ok(candidates)
            }
            Err(_) if !status.is_success() => {
                Err(UpstreamError::Routing(format!("OSRM request failed: {status}")))
            }
            Err(err) => Err(UpstreamError::Routing(format!(
                "failed to parse OSRM response: {err}"
            ))),
        }
    }
}
