//! Multi-criteria ranking across candidate routes.

use crate::models::ScoredRoute;
use crate::rules::ScoringRules;

/// Fill in `ranking_score` for every route and sort best (lowest) first.
///
/// Exposure and duration are normalized by their maxima over the candidate
/// set, floored so a single route or an all-zero set never divides by zero.
/// The sort is stable: exact ties keep their input order.
pub fn rank_scored_routes(mut routes: Vec<ScoredRoute>, rules: &ScoringRules) -> Vec<ScoredRoute> {
    let max_exposure = routes
        .iter()
        .map(|route| route.exposure_score)
        .fold(rules.min_normalizer, f64::max);
    let max_duration = routes
        .iter()
        .map(|route| route.duration_min)
        .fold(rules.min_normalizer, f64::max);

    let weights = &rules.weights;
    for route in &mut routes {
        let norm_exposure = route.exposure_score / max_exposure;
        let norm_duration = route.duration_min / max_duration;
        let risk_weight = route.risk.weight() / 3.0;
        route.ranking_score = weights.exposure * norm_exposure
            + weights.duration * norm_duration
            + weights.risk * risk_weight;
    }

    routes.sort_by(|a, b| a.ranking_score.total_cmp(&b.ranking_score));
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTier;

    fn scored(route_id: usize, exposure_score: f64, duration_min: f64, risk: RiskTier) -> ScoredRoute {
        ScoredRoute {
            route_id,
            distance_km: 1.0,
            duration_min,
            avg_aqi: 0.0,
            exposure_score,
            risk,
            insights: Vec::new(),
            ranking_score: 0.0,
            geometry: Vec::new(),
        }
    }

    #[test]
    fn exposure_dominates_duration() {
        let rules = ScoringRules::default();
        let ranked = rank_scored_routes(
            vec![
                scored(1, 240.0, 2.0, RiskTier::High),
                scored(2, 50.0, 5.0, RiskTier::Medium),
            ],
            &rules,
        );

        assert_eq!(ranked[0].route_id, 2);
        assert!((ranked[0].ranking_score - 0.5375).abs() < 1e-3, "{}", ranked[0].ranking_score);
        assert_eq!(ranked[1].route_id, 1);
        assert!((ranked[1].ranking_score - 0.82).abs() < 1e-9);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let rules = ScoringRules::default();
        let ranked = rank_scored_routes(
            vec![
                scored(1, 10.0, 3.0, RiskTier::Low),
                scored(2, 10.0, 3.0, RiskTier::Low),
                scored(3, 10.0, 3.0, RiskTier::Low),
            ],
            &rules,
        );
        let ids: Vec<usize> = ranked.iter().map(|r| r.route_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn all_zero_routes_use_floors() {
        let rules = ScoringRules::default();
        let ranked = rank_scored_routes(vec![scored(1, 0.0, 0.0, RiskTier::Low)], &rules);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].ranking_score.is_finite());
        assert!((ranked[0].ranking_score - 0.2 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_set_ranks_to_empty() {
        let rules = ScoringRules::default();
        assert!(rank_scored_routes(Vec::new(), &rules).is_empty());
    }
}
