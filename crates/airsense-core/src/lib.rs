pub mod engine;
pub mod error;
pub mod exposure;
pub mod models;
pub mod ranking;
pub mod rules;
pub mod sampling;
pub mod scoring;
pub mod sensors;
pub mod spatial;

pub use engine::{rank_candidates, rank_routes, ForecastSource, RouteSource};
pub use error::{DataGapWarning, RankError, UpstreamError};
pub use models::{
    Coordinate, ForecastRecord, HealthProfile, Horizon, RankRequest, RankedRoutes, RiskTier,
    RouteCandidate, ScoredRoute,
};
pub use rules::{RankingWeights, RiskThresholds, ScoringRules};
pub use sampling::sample_route;
pub use sensors::{SensorMatch, SensorSnapshot};
pub use spatial::{bearing_deg, haversine_distance};
