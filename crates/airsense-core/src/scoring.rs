//! Per-route exposure aggregation and hazard insights.

use crate::exposure::{segment_exposure, wind_adjustment};
use crate::models::{Horizon, RiskTier, RouteCandidate, ScoredRoute};
use crate::rules::ScoringRules;
use crate::sampling::sample_route;
use crate::sensors::SensorSnapshot;

pub const WIND_ALIGNMENT_INSIGHT: &str =
    "Wind predominantly aligned with travel direction (increases exposure).";

/// Aggregated score of a single route before ranking.
#[derive(Debug, Clone)]
pub struct RouteScore {
    /// Route with every field filled in except `ranking_score`
    pub route: ScoredRoute,
    /// Segments skipped because no sensor could be matched
    pub unmatched_segments: usize,
}

#[derive(Debug, Default)]
struct Totals {
    exposure: f64,
    aqi: f64,
    unmatched_segments: usize,
}

/// Score one candidate against the forecast snapshot.
///
/// `route_id` is the candidate's 1-based input position.
pub fn score_route(
    route_id: usize,
    candidate: &RouteCandidate,
    snapshot: &SensorSnapshot<'_>,
    horizon: Horizon,
    health_weight: f64,
    rules: &ScoringRules,
) -> RouteScore {
    let waypoints = sample_route(&candidate.geometry, rules.sample_interval_m);

    let mut totals = Totals::default();
    let mut insights = Vec::new();
    let mut high_aqi_reported = false;
    let mut wind_reported = false;

    for pair in waypoints.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);

        let Some(sensor) = snapshot.nearest(start) else {
            totals.unmatched_segments += 1;
            continue;
        };

        // A repeated waypoint still contributes its concentration to the
        // average, just no exposure.
        let length_m = start.distance_to(end).max(0.0);
        let aqi = sensor.record.concentration(horizon);
        let wind_adj = wind_adjustment(
            start.bearing_to(end),
            sensor.record.wind_direction_deg(),
            rules,
        );

        totals.exposure += segment_exposure(aqi, length_m, wind_adj, health_weight);
        totals.aqi += aqi;

        if !high_aqi_reported && aqi > rules.high_aqi_insight {
            insights.push(format!(
                "High PM2.5 cluster near {}, {}.",
                format_coordinate(start.lat),
                format_coordinate(start.lon)
            ));
            high_aqi_reported = true;
        }
        if !wind_reported && wind_adj > rules.wind_alignment_insight {
            insights.push(WIND_ALIGNMENT_INSIGHT.to_string());
            wind_reported = true;
        }
    }

    let segment_count = waypoints.len().saturating_sub(1).max(1);
    let avg_aqi = totals.aqi / segment_count as f64;
    let distance_km = (candidate.distance_meters / 1000.0).max(rules.min_distance_km);
    let exposure_score = totals.exposure / distance_km;

    RouteScore {
        route: ScoredRoute {
            route_id,
            distance_km: round_to(distance_km, 2),
            duration_min: round_to(candidate.duration_seconds.max(0.0) / 60.0, 1),
            avg_aqi: round_to(avg_aqi, 1),
            exposure_score: round_to(exposure_score.max(0.0), 2),
            risk: RiskTier::classify(avg_aqi, &rules.risk_thresholds),
            insights,
            ranking_score: 0.0,
            geometry: candidate.geometry.clone(),
        },
        unmatched_segments: totals.unmatched_segments,
    }
}

/// Coordinate rounded to 4 decimals in shortest form, keeping one decimal
/// for whole numbers (`28.6`, `77.0`).
fn format_coordinate(value: f64) -> String {
    let rounded = round_to(value, 4);
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
