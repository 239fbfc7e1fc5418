//! Dual-stick navigation kinematics
//!
//! This crate provides:
//! - Dead-zone filtering and per-step drive/look tuning
//! - The `StickDrive` kinematic step model
//! - The `NavEngine` that owns state, status and zoom

pub mod drive;
pub mod engine;

pub use drive::*;
pub use engine::*;
