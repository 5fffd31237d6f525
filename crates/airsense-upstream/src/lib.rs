//! AirSense Upstream - clients for the external collaborators
//!
//! Handles all communication with the directions service (OSRM) and the
//! per-node air-quality forecast service.

pub mod forecast;
pub mod osrm;

pub use forecast::{parse_forecast_payload, ForecastClient, DEFAULT_FORECAST_URL};
pub use osrm::{OsrmClient, OsrmResponse, DEFAULT_OSRM_URL, DEFAULT_PROFILE};
