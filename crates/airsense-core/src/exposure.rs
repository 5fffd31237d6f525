//! Directional wind exposure model.
//!
//! Exposure grows linearly with concentration and traversed distance, is
//! perturbed by how the wind lines up with the direction of travel, and is
//! scaled by the traveler's health weight. No dispersion physics.

use crate::rules::ScoringRules;
use crate::spatial::angular_difference;

/// Wind multiplier for a segment heading `bearing_deg` under wind blowing from
/// `wind_direction_deg`.
///
/// Linear from `wind_align_bonus` (0° apart) down to `wind_oppose_penalty`
/// (180° apart).
pub fn wind_adjustment(bearing_deg: f64, wind_direction_deg: f64, rules: &ScoringRules) -> f64 {
    let align = rules.wind_align_bonus;
    let oppose = rules.wind_oppose_penalty;
    let diff = angular_difference(bearing_deg, wind_direction_deg);
    let adjustment = align - (diff / 180.0) * (align - oppose);
    adjustment.clamp(align.min(oppose), align.max(oppose))
}

/// Exposure contribution of one segment.
pub fn segment_exposure(
    aqi: f64,
    segment_length_m: f64,
    wind_adjustment: f64,
    health_weight: f64,
) -> f64 {
    aqi.max(0.0) * (segment_length_m / 1000.0) * wind_adjustment * health_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tailwind_and_headwind_bounds() {
        let rules = ScoringRules::default();
        assert!((wind_adjustment(0.0, 0.0, &rules) - 1.2).abs() < 1e-9);
        assert!((wind_adjustment(0.0, 180.0, &rules) - 0.8).abs() < 1e-9);
        assert!((wind_adjustment(90.0, 0.0, &rules) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn wind_adjustment_stays_in_range() {
        let rules = ScoringRules::default();
        for bearing in (0..360).step_by(15) {
            for wind in (0..=360).step_by(20) {
                let adj = wind_adjustment(bearing as f64, wind as f64, &rules);
                assert!((0.8..=1.2).contains(&adj), "{bearing}/{wind} -> {adj}");
            }
        }
    }

    #[test]
    fn wind_adjustment_wraps_across_north() {
        let rules = ScoringRules::default();
        let near = wind_adjustment(355.0, 5.0, &rules);
        assert!((near - (1.2 - 10.0 / 180.0 * 0.4)).abs() < 1e-9);
    }

    #[test]
    fn segment_exposure_scales_multiplicatively() {
        let exposure = segment_exposure(200.0, 1110.0, 1.2, 1.0);
        assert!((exposure - 266.4).abs() < 1e-9);
        let sensitive = segment_exposure(200.0, 1110.0, 1.2, 1.5);
        assert!((sensitive - exposure * 1.5).abs() < 1e-9);
    }
}
