//! Shared library surface for the AirSense server and its tests.

pub mod api;
pub mod config;
pub mod state;
