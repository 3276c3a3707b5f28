//! Test fixtures for activity-map.
//!
//! Provides realistic test data:
//! - Real Shanghai / Hangzhou / Beijing GPS traces (from OpenStreetMap)

pub mod shanghai_routes;

pub use shanghai_routes::*;
