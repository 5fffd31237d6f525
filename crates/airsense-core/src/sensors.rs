//! Nearest-sensor resolution over a forecast snapshot.

use crate::models::{Coordinate, ForecastRecord};

/// Read-only view of every sensor node's forecast for one ranking call.
///
/// Lookups are a linear scan, O(nodes) per waypoint. Equidistant nodes resolve
/// to the one listed first in the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SensorSnapshot<'a> {
    records: &'a [ForecastRecord],
}

/// A resolved sensor together with its distance from the query point.
#[derive(Debug, Clone, Copy)]
pub struct SensorMatch<'a> {
    pub record: &'a ForecastRecord,
    pub distance_m: f64,
}

impl<'a> SensorSnapshot<'a> {
    pub fn new(records: &'a [ForecastRecord]) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sensor closest to `point`, or `None` for an empty snapshot.
    pub fn nearest(&self, point: &Coordinate) -> Option<SensorMatch<'a>> {
        let mut best: Option<SensorMatch<'a>> = None;
        for record in self.records {
            let distance_m = point.distance_to(&record.position());
            if !distance_m.is_finite() {
                continue;
            }
            match best {
                Some(current) if distance_m >= current.distance_m => {}
                _ => best = Some(SensorMatch { record, distance_m }),
            }
        }
        best
    }
}
