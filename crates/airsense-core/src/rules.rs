//! Scoring rules and thresholds for the exposure engine.

use serde::{Deserialize, Serialize};

/// Configuration for route sampling, exposure and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Target spacing between sampled waypoints in meters
    pub sample_interval_m: f64,
    /// Wind multiplier when the wind blows along the travel direction
    pub wind_align_bonus: f64,
    /// Wind multiplier for a direct headwind
    pub wind_oppose_penalty: f64,
    pub risk_thresholds: RiskThresholds,
    /// Segment concentration above which a pollution-cluster insight fires
    pub high_aqi_insight: f64,
    /// Wind multiplier above which the wind-alignment insight fires
    pub wind_alignment_insight: f64,
    /// Floor for the distance used to normalize exposure, in km
    pub min_distance_km: f64,
    /// Floor for the ranker's exposure and duration maxima
    pub min_normalizer: f64,
    pub weights: RankingWeights,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            sample_interval_m: 500.0,
            wind_align_bonus: 1.2,
            wind_oppose_penalty: 0.8,
            risk_thresholds: RiskThresholds::default(),
            high_aqi_insight: 150.0,
            wind_alignment_insight: 1.15,
            min_distance_km: 0.1,
            min_normalizer: 0.1,
            weights: RankingWeights::default(),
        }
    }
}

/// Upper bounds (inclusive) of the Low and Medium risk tiers. Kept in line
/// with the forecasting service's own classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: 50.0,
            medium_max: 150.0,
        }
    }
}

/// Blend weights of the ranking score. Lower scores rank first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub exposure: f64,
    pub duration: f64,
    pub risk: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            exposure: 0.5,
            duration: 0.3,
            risk: 0.2,
        }
    }
}
