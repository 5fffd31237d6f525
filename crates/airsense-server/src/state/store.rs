//! Upstream clients and scoring rules shared by every request.

use airsense_core::ScoringRules;
use airsense_upstream::{ForecastClient, OsrmClient};
use anyhow::{Context, Result};

use crate::config::Config;

/// Application state - one connection pool shared by both upstream clients.
pub struct AppState {
    rules: ScoringRules,
    osrm: OsrmClient,
    forecast: ForecastClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .build()
            .context("Failed to create HTTP client")?;
        let osrm = OsrmClient::with_client(
            client.clone(),
            config.osrm_base_url.clone(),
            config.osrm_profile.clone(),
        );
        let forecast = ForecastClient::with_client(client, config.forecast_url.clone());
        Ok(Self::with_clients(config, osrm, forecast))
    }

    /// Assemble state from prebuilt clients. A configured forecast token
    /// replaces whatever token `forecast` carries.
    pub fn with_clients(config: Config, osrm: OsrmClient, forecast: ForecastClient) -> Self {
        let forecast = match config.forecast_token.clone() {
            Some(token) => forecast.with_auth_token(Some(token)),
            None => forecast,
        };
        Self {
            rules: config.scoring_rules(),
            osrm,
            forecast,
        }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Directions client tagged with the caller's request id.
    pub fn osrm(&self, request_id: Option<String>) -> OsrmClient {
        self.osrm.with_request_id(request_id)
    }

    /// Forecast client tagged with the caller's request id.
    pub fn forecast(&self, request_id: Option<String>) -> ForecastClient {
        self.forecast.with_request_id(request_id)
    }
}
