//! Console profile loading
//!
//! Optional JSON profile for the operator console. A missing file or any
//! omitted field falls back to defaults, so a bare checkout runs with no
//! configuration at all.

use std::fs;
use std::path::Path;

use kinematics::DriveTuning;
use log::warn;
use serde::{Deserialize, Serialize};
use telemetry::GeoReference;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse profile: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Operating mode selector shown on the console. Display state only; the
/// engine runs the same kinematics in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriveMode {
    Auto,
    SemiAuto,
    #[default]
    Manual,
}

impl DriveMode {
    pub const ALL: [DriveMode; 3] = [DriveMode::Auto, DriveMode::SemiAuto, DriveMode::Manual];

    pub fn label(&self) -> &'static str {
        match self {
            DriveMode::Auto => "Auto",
            DriveMode::SemiAuto => "Semi-Auto",
            DriveMode::Manual => "Manual",
        }
    }
}

/// Which center feed the console is tuned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapView {
    Map3d,
    #[default]
    Camera,
    Map2d,
}

impl MapView {
    pub const ALL: [MapView; 3] = [MapView::Map3d, MapView::Camera, MapView::Map2d];

    pub fn label(&self) -> &'static str {
        match self {
            MapView::Map3d => "3D Map",
            MapView::Camera => "Camera",
            MapView::Map2d => "2D Map",
        }
    }
}

/// Everything the console reads from its profile file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleProfile {
    pub title: String,
    pub drive_mode: DriveMode,
    pub map_view: MapView,
    /// Selector state only, never fed into the kinematics.
    pub speed_multiplier: f64,
    pub temperature_label: String,
    pub battery_percent: u8,
    pub notifications: u32,
    /// Mission runtime the counter starts from, in seconds.
    pub runtime_seed_seconds: u64,
    pub geo: GeoReference,
    pub tuning: DriveTuning,
}

impl Default for ConsoleProfile {
    fn default() -> Self {
        ConsoleProfile {
            title: "Teleop Navigation Console".to_string(),
            drive_mode: DriveMode::Manual,
            map_view: MapView::Camera,
            speed_multiplier: 0.5,
            temperature_label: "21 °C".to_string(),
            battery_percent: 89,
            notifications: 2,
            runtime_seed_seconds: 2 * 3600 + 34 * 60,
            geo: GeoReference::default(),
            tuning: DriveTuning::default(),
        }
    }
}

pub fn load_profile(path: &Path) -> Result<ConsoleProfile, ProfileError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load the profile, falling back to defaults when the file is missing or
/// malformed. No file at all is the normal case and logs nothing.
pub fn load_or_default(path: &Path) -> ConsoleProfile {
    if !path.exists() {
        return ConsoleProfile::default();
    }
    match load_profile(path) {
        Ok(profile) => profile,
        Err(err) => {
            warn!("profile {} unusable ({err}), using defaults", path.display());
            ConsoleProfile::default()
        }
    }
}
