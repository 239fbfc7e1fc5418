//! Core state types and model traits shared by the navigation crates.
//!
//! This crate defines:
//! - Stick input and pose state types
//! - The shared `NavState` aggregate stepped by models
//! - The `Model` / `NavModel` trait family

pub mod traits;

pub use traits::*;
