//! Core data models for route exposure scoring.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RankError;
use crate::rules::RiskThresholds;
use crate::spatial::{bearing_deg, haversine_distance};

/// A WGS84 position. Serialized as a GeoJSON `[lon, lat]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }

    /// Initial bearing towards `other` in degrees [0, 360).
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        bearing_deg(self.lat, self.lon, other.lat, other.lon)
    }

    /// True when both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lon, coord.lat]
    }
}

/// One alternative path returned by the directions service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub geometry: Vec<Coordinate>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Latest/forecast snapshot of a single sensor node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub node_id: i64,
    pub lat: f64,
    pub lon: f64,
    /// Direction the wind blows from, degrees
    #[serde(default)]
    pub wind_direction: Option<f64>,
    #[serde(default)]
    pub aqi_now: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi_6h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi_12h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi_24h: Option<f64>,
}

impl ForecastRecord {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    pub fn wind_direction_deg(&self) -> f64 {
        self.wind_direction.filter(|deg| deg.is_finite()).unwrap_or(0.0)
    }

    /// Concentration for `horizon`, falling back to `aqi_now` when this node
    /// has no prediction for it.
    pub fn concentration(&self, horizon: Horizon) -> f64 {
        let predicted = match horizon {
            Horizon::Now => None,
            Horizon::SixHours => self.aqi_6h,
            Horizon::TwelveHours => self.aqi_12h,
            Horizon::TwentyFourHours => self.aqi_24h,
        };
        predicted.unwrap_or(self.aqi_now)
    }
}

/// Forecast lead time selecting which concentration field is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Horizon {
    #[default]
    Now,
    SixHours,
    TwelveHours,
    TwentyFourHours,
}

impl Horizon {
    /// Parse a horizon label. Anything other than `6h`, `12h` or `24h` is `Now`.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "6h" => Horizon::SixHours,
            "12h" => Horizon::TwelveHours,
            "24h" => Horizon::TwentyFourHours,
            _ => Horizon::Now,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Now => "now",
            Horizon::SixHours => "6h",
            Horizon::TwelveHours => "12h",
            Horizon::TwentyFourHours => "24h",
        }
    }
}

impl From<String> for Horizon {
    fn from(label: String) -> Self {
        Horizon::parse(&label)
    }
}

impl From<Horizon> for &'static str {
    fn from(horizon: Horizon) -> Self {
        horizon.label()
    }
}

/// Traveler sensitivity flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthProfile {
    pub asthma: bool,
    pub child: bool,
    pub elderly: bool,
}

impl HealthProfile {
    pub const ASTHMA_WEIGHT: f64 = 1.5;
    pub const CHILD_WEIGHT: f64 = 1.4;
    pub const ELDERLY_WEIGHT: f64 = 1.3;

    /// Build a profile from a loosely typed JSON object.
    ///
    /// Unknown keys are ignored and absent or null keys are false. A known key
    /// carrying anything other than a boolean is rejected.
    pub fn from_flags(flags: &Map<String, Value>) -> Result<Self, RankError> {
        let flag = |key: &str| -> Result<bool, RankError> {
            match flags.get(key) {
                None | Some(Value::Null) => Ok(false),
                Some(Value::Bool(value)) => Ok(*value),
                Some(other) => Err(RankError::input(format!(
                    "health_profile.{key} must be a boolean, got {other}"
                ))),
            }
        };
        Ok(Self {
            asthma: flag("asthma")?,
            child: flag("child")?,
            elderly: flag("elderly")?,
        })
    }

    /// Exposure multiplier for this profile. The most sensitive applicable
    /// category wins; categories never stack.
    pub fn health_weight(&self) -> f64 {
        let mut weight: f64 = 1.0;
        if self.asthma {
            weight = weight.max(Self::ASTHMA_WEIGHT);
        }
        if self.child {
            weight = weight.max(Self::CHILD_WEIGHT);
        }
        if self.elderly {
            weight = weight.max(Self::ELDERLY_WEIGHT);
        }
        weight
    }
}

/// Coarse classification of average route concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn classify(aqi: f64, thresholds: &RiskThresholds) -> Self {
        if aqi <= thresholds.low_max {
            RiskTier::Low
        } else if aqi <= thresholds.medium_max {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    /// Ordinal weight used by the ranker (1..=3).
    pub fn weight(&self) -> f64 {
        match self {
            RiskTier::Low => 1.0,
            RiskTier::Medium => 2.0,
            RiskTier::High => 3.0,
        }
    }

    /// Map palette colour shared with the forecast heatmap.
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "#10b981",
            RiskTier::Medium => "#f97316",
            RiskTier::High => "#ef4444",
        }
    }
}

/// Scored and ranked view of one route candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRoute {
    /// 1-based position of the candidate in the input order
    pub route_id: usize,
    pub distance_km: f64,
    pub duration_min: f64,
    pub avg_aqi: f64,
    pub exposure_score: f64,
    pub risk: RiskTier,
    pub insights: Vec<String>,
    pub ranking_score: f64,
    #[serde(rename = "original_geometry")]
    pub geometry: Vec<Coordinate>,
}

/// Result of one ranking call, best route first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRoutes {
    pub best_route_id: Option<usize>,
    pub routes: Vec<ScoredRoute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<crate::error::DataGapWarning>,
}

impl RankedRoutes {
    pub fn empty() -> Self {
        Self {
            best_route_id: None,
            routes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn best(&self) -> Option<&ScoredRoute> {
        self.routes.first()
    }
}

/// Input of a ranking request.
#[derive(Debug, Clone)]
pub struct RankRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub horizon: Horizon,
    pub health_profile: HealthProfile,
}

impl RankRequest {
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        horizon: Horizon,
        health_profile: HealthProfile,
    ) -> Self {
        Self {
            origin,
            destination,
            horizon,
            health_profile,
        }
    }

    pub fn validate(&self) -> Result<(), RankError> {
        if !self.origin.is_valid() {
            return Err(RankError::input(format!(
                "origin out of range: lat={}, lon={}",
                self.origin.lat, self.origin.lon
            )));
        }
        if !self.destination.is_valid() {
            return Err(RankError::input(format!(
                "destination out of range: lat={}, lon={}",
                self.destination.lat, self.destination.lon
            )));
        }
        Ok(())
    }
}
