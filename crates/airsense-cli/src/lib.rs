//! AirSense CLI - command line access to the safe-route planner.
//!
//! Binaries:
//! - plan_route: rank route alternatives between two points

pub mod client;
pub mod report;

pub use client::{AirSenseClient, PlanSafeRouteRequest};
