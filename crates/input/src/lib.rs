//! Virtual joystick input capture
//!
//! This crate provides:
//! - `PadBounds` for measured widget rectangles
//! - `StickCapture` for begin/move/end gesture tracking with a
//!   gesture-fixed center and unit-magnitude clamping

pub mod capture;

pub use capture::*;
