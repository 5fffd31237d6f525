//! Server configuration from environment.

use airsense_core::ScoringRules;
use airsense_upstream::{DEFAULT_FORECAST_URL, DEFAULT_OSRM_URL, DEFAULT_PROFILE};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub osrm_base_url: String,
    pub osrm_profile: String,
    pub forecast_url: String,
    /// Bearer token for the forecast service
    pub forecast_token: Option<String>,
    pub upstream_timeout_s: u64,
    pub log_format: LogFormat,
    // Scoring overrides; `None` keeps the engine default.
    pub sample_interval_m: Option<f64>,
    pub wind_align_bonus: Option<f64>,
    pub wind_oppose_penalty: Option<f64>,
    pub risk_low_max: Option<f64>,
    pub risk_medium_max: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str| {
            lookup(key)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite() && *value > 0.0)
        };

        Self {
            server_port: lookup("AIRSENSE_PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(3000),
            osrm_base_url: lookup("OSRM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OSRM_URL.to_string()),
            osrm_profile: lookup("OSRM_PROFILE")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            forecast_url: lookup("FORECAST_SERVICE_URL")
                .unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string()),
            forecast_token: lookup("FORECAST_SERVICE_TOKEN")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            upstream_timeout_s: lookup("UPSTREAM_TIMEOUT_S")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(10),
            log_format: lookup("AIRSENSE_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
            sample_interval_m: positive("AIRSENSE_SAMPLE_INTERVAL_M"),
            wind_align_bonus: positive("AIRSENSE_WIND_ALIGN_BONUS"),
            wind_oppose_penalty: positive("AIRSENSE_WIND_OPPOSE_PENALTY"),
            risk_low_max: positive("AIRSENSE_RISK_LOW_MAX"),
            risk_medium_max: positive("AIRSENSE_RISK_MEDIUM_MAX"),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_s)
    }

    /// Engine rules with any configured overrides applied.
    pub fn scoring_rules(&self) -> ScoringRules {
        let mut rules = ScoringRules::default();
        if let Some(value) = self.sample_interval_m {
            rules.sample_interval_m = value;
        }
        if let Some(value) = self.wind_align_bonus {
            rules.wind_align_bonus = value;
        }
        if let Some(value) = self.wind_oppose_penalty {
            rules.wind_oppose_penalty = value;
        }
        if let Some(value) = self.risk_low_max {
            rules.risk_thresholds.low_max = value;
        }
        if let Some(value) = self.risk_medium_max {
            rules.risk_thresholds.medium_max = value;
        }
        if rules.risk_thresholds.medium_max < rules.risk_thresholds.low_max {
            tracing::warn!(
                "AIRSENSE_RISK_MEDIUM_MAX ({}) below AIRSENSE_RISK_LOW_MAX ({}); clamping",
                rules.risk_thresholds.medium_max,
                rules.risk_thresholds.low_max
            );
            rules.risk_thresholds.medium_max = rules.risk_thresholds.low_max;
        }
        rules
    }
}
