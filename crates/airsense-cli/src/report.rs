//! Plain-text rendering of a ranking.

use airsense_core::{DataGapWarning, RankedRoutes};
use std::fmt::Write;

pub fn format_ranking(ranked: &RankedRoutes) -> String {
    let mut out = String::new();
    if ranked.routes.is_empty() {
        out.push_str("No route alternatives found.\n");
    } else {
        let _ = writeln!(
            out,
            "{:<4} {:>5} {:>9} {:>9} {:>8} {:>9} {:<6} {:>7}",
            "", "ROUTE", "DIST(km)", "TIME(min)", "AVG AQI", "EXPOSURE", "RISK", "SCORE"
        );
        for route in &ranked.routes {
            let marker = if Some(route.route_id) == ranked.best_route_id {
                "*"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "{:<4} {:>5} {:>9.2} {:>9.1} {:>8.1} {:>9.2} {:<6} {:>7.4}",
                marker,
                route.route_id,
                route.distance_km,
                route.duration_min,
                route.avg_aqi,
                route.exposure_score,
                format!("{:?}", route.risk),
                route.ranking_score
            );
            for insight in &route.insights {
                let _ = writeln!(out, "       - {}", insight);
            }
        }
    }
    if let Some(best) = ranked.best() {
        let _ = writeln!(
            out,
            "Best: route {} ({:.2} km, {:?} risk)",
            best.route_id, best.distance_km, best.risk
        );
    }

    for warning in &ranked.warnings {
        let _ = writeln!(out, "warning: {}", describe_warning(warning));
    }
    out
}

fn describe_warning(warning: &DataGapWarning) -> String {
    match warning {
        DataGapWarning::NoRouteAlternatives => "directions service returned no routes".to_string(),
        DataGapWarning::EmptyForecastSnapshot => {
            "forecast snapshot was empty; exposure not scored".to_string()
        }
        DataGapWarning::UnmatchedSegments { route_id, count } => {
            format!("route {route_id}: {count} segments had no sensor match")
        }
    }
}
