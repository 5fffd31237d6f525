//! Error and data-gap types for the ranking engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of one of the external collaborators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    /// The directions service found no path between the endpoints.
    #[error("no route alternatives between origin and destination")]
    NoRoute,
    #[error("routing service error: {0}")]
    Routing(String),
    #[error("forecast service error: {0}")]
    Forecast(String),
}

/// Errors surfaced by `rank_routes`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RankError {
    /// Caller supplied invalid coordinates or a malformed health profile.
    #[error("invalid input: {0}")]
    Input(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RankError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }
}

/// Degraded-but-usable conditions reported alongside a ranking result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataGapWarning {
    NoRouteAlternatives,
    EmptyForecastSnapshot,
    /// Segments of a route that had no sensor match and were left unscored.
    UnmatchedSegments { route_id: usize, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_error_converts_into_rank_error() {
        let err: RankError = UpstreamError::Forecast("timeout".into()).into();
        assert!(matches!(err, RankError::Upstream(UpstreamError::Forecast(_))));
        assert_eq!(err.to_string(), "forecast service error: timeout");
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let warning = DataGapWarning::UnmatchedSegments {
            route_id: 2,
            count: 4,
        };
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            json!({"kind": "unmatched_segments", "route_id": 2, "count": 4})
        );
        assert_eq!(
            serde_json::to_value(DataGapWarning::EmptyForecastSnapshot).unwrap(),
            json!({"kind": "empty_forecast_snapshot"})
        );
    }
}
