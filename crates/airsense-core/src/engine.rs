//! Ranking entry points.
//!
//! `rank_routes` fetches the candidate geometries and the forecast snapshot
//! exactly once each, then scores everything synchronously. Collaborator cost
//! stays constant no matter how many routes or segments are scored.

use std::future::Future;

use crate::error::{DataGapWarning, RankError, UpstreamError};
use crate::models::{Coordinate, ForecastRecord, Horizon, RankRequest, RankedRoutes, RouteCandidate};
use crate::ranking::rank_scored_routes;
use crate::rules::ScoringRules;
use crate::scoring::score_route;
use crate::sensors::SensorSnapshot;

/// Directions service returning alternative paths between two points.
pub trait RouteSource {
    fn fetch_route_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, UpstreamError>> + Send;
}

/// Forecast service returning the latest record of every sensor node.
pub trait ForecastSource {
    fn fetch_forecast_snapshot(
        &self,
    ) -> impl Future<Output = Result<Vec<ForecastRecord>, UpstreamError>> + Send;
}

/// Fetch, score and rank the alternatives for `request`.
///
/// A directions service reporting no path yields an empty result with a
/// `NoRouteAlternatives` warning rather than an error.
pub async fn rank_routes<R, F>(
    routes: &R,
    forecasts: &F,
    request: &RankRequest,
    rules: &ScoringRules,
) -> Result<RankedRoutes, RankError>
where
    R: RouteSource + Sync,
    F: ForecastSource + Sync,
{
    request.validate()?;

    let candidates = match routes
        .fetch_route_alternatives(request.origin, request.destination)
        .await
    {
        Ok(candidates) => candidates,
        Err(UpstreamError::NoRoute) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    if candidates.is_empty() {
        let mut ranked = RankedRoutes::empty();
        ranked.warnings.push(DataGapWarning::NoRouteAlternatives);
        return Ok(ranked);
    }

    let snapshot = forecasts.fetch_forecast_snapshot().await?;

    Ok(rank_candidates(
        &candidates,
        &snapshot,
        request.horizon,
        request.health_profile.health_weight(),
        rules,
    ))
}

/// Score and rank already-fetched candidates against a forecast snapshot.
pub fn rank_candidates(
    candidates: &[RouteCandidate],
    snapshot: &[ForecastRecord],
    horizon: Horizon,
    health_weight: f64,
    rules: &ScoringRules,
) -> RankedRoutes {
    if candidates.is_empty() {
        let mut ranked = RankedRoutes::empty();
        ranked.warnings.push(DataGapWarning::NoRouteAlternatives);
        return ranked;
    }

    let sensors = SensorSnapshot::new(snapshot);
    let mut warnings = Vec::new();
    if sensors.is_empty() {
        warnings.push(DataGapWarning::EmptyForecastSnapshot);
    }

    let mut scored = Vec::with_capacity(candidates.len());
    for (idx, candidate) in candidates.iter().enumerate() {
        let score = score_route(idx + 1, candidate, &sensors, horizon, health_weight, rules);
        if score.unmatched_segments > 0 && !sensors.is_empty() {
            warnings.push(DataGapWarning::UnmatchedSegments {
                route_id: score.route.route_id,
                count: score.unmatched_segments,
            });
        }
        scored.push(score.route);
    }

    let routes = rank_scored_routes(scored, rules);
    RankedRoutes {
        best_route_id: routes.first().map(|route| route.route_id),
        routes,
        warnings,
    }
}
