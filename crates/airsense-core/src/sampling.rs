//! Route polyline sampling.

use crate::models::Coordinate;

/// Reduce a dense polyline to waypoints spaced roughly `interval_m` apart.
///
/// Greedy forward accumulation: the second point of a pair is emitted once the
/// running distance reaches the interval, so spacing is biased towards
/// polyline vertices. The first and last coordinates are always emitted, the
/// last one possibly twice.
pub fn sample_route(coordinates: &[Coordinate], interval_m: f64) -> Vec<Coordinate> {
    let (Some(first), Some(last)) = (coordinates.first(), coordinates.last()) else {
        return Vec::new();
    };

    let mut sampled = vec![*first];
    let mut accumulated_m = 0.0;

    for pair in coordinates.windows(2) {
        accumulated_m += pair[0].distance_to(&pair[1]);
        if accumulated_m >= interval_m {
            sampled.push(pair[1]);
            accumulated_m = 0.0;
        }
    }

    sampled.push(*last);
    sampled
}
