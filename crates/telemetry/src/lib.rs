//! Geolocation telemetry and display formatting
//!
//! This crate provides:
//! - A configurable geographic reference frame
//! - Pure pose-to-telemetry derivation
//! - HUD string formatters (DMS, runtime, compass rose)

pub mod format;
pub mod geo;

pub use format::*;
pub use geo::*;
