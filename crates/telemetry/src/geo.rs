//! Geolocation telemetry derivation
//!
//! Maps engine-space coordinates onto a geographic reference frame. The
//! mapping is affine per axis: world z scales into latitude, world x into
//! longitude and world y into elevation around a base coordinate. At
//! stick working ranges the flat-earth approximation holds comfortably.

use nalgebra::Vector3;
use navcore::NavPose;
use serde::{Deserialize, Serialize};

/// Geographic reference frame the telemetry is expressed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoReference {
    /// Latitude mapped to world z = 0 (decimal degrees, north positive).
    pub base_latitude: f64,
    /// Longitude mapped to world x = 0 (decimal degrees, east positive).
    pub base_longitude: f64,
    /// Elevation mapped to world y = 0 (meters).
    pub base_elevation: f64,
    /// Degrees of latitude per meter of world z.
    pub latitude_per_z: f64,
    /// Degrees of longitude per meter of world x.
    pub longitude_per_x: f64,
    /// Meters of elevation per meter of world y.
    pub elevation_per_y: f64,
}

impl Default for GeoReference {
    fn default() -> Self {
        GeoReference {
            base_latitude: 60.2828, // decimal degrees
            base_longitude: 25.0267,
            base_elevation: 127.0, // m
            latitude_per_z: 1e-4,
            longitude_per_x: 1e-4,
            elevation_per_y: 10.0,
        }
    }
}

impl GeoReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base coordinate (builder pattern)
    pub fn with_base(mut self, latitude: f64, longitude: f64) -> Self {
        self.base_latitude = latitude;
        self.base_longitude = longitude;
        self
    }

    /// Set the base elevation
    pub fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = elevation;
        self
    }

    /// Set the world-to-degree axis scales
    pub fn with_axis_scales(mut self, latitude_per_z: f64, longitude_per_x: f64) -> Self {
        self.latitude_per_z = latitude_per_z;
        self.longitude_per_x = longitude_per_x;
        self
    }
}

/// One frame of derived telemetry, ready for display formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    /// Euclidean distance from the telemetry origin (meters).
    pub distance: f64,
    /// Decimal degrees, north positive.
    pub latitude: f64,
    /// Decimal degrees, east positive.
    pub longitude: f64,
    /// Meters above the datum.
    pub elevation: f64,
}

/// Derives geolocation telemetry from a pose.
///
/// Pure with respect to the pose: deriving twice from the same inputs
/// yields identical snapshots, so callers are free to derive per panel
/// rather than caching.
#[derive(Debug, Clone, Default)]
pub struct GeoModel {
    pub reference: GeoReference,
}

impl GeoModel {
    pub fn new(reference: GeoReference) -> Self {
        GeoModel { reference }
    }

    /// Derive the telemetry for a pose against the given origin.
    ///
    /// Distance is measured from the origin; the geographic fields map the
    /// absolute position, so a reset that rebases the origin zeroes the
    /// distance without moving the reported coordinates.
    pub fn derive(&self, pose: &NavPose, origin: &Vector3<f64>) -> TelemetrySnapshot {
        let r = &self.reference;
        let p = &pose.position;
        TelemetrySnapshot {
            distance: (p - origin).norm(),
            latitude: r.base_latitude + p.z * r.latitude_per_z,
            longitude: r.base_longitude + p.x * r.longitude_per_x,
            elevation: r.base_elevation + p.y * r.elevation_per_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reference() {
        let r = GeoReference::default();
        assert!((r.base_latitude - 60.2828).abs() < 1e-12);
        assert!((r.base_longitude - 25.0267).abs() < 1e-12);
        assert!((r.base_elevation - 127.0).abs() < 1e-12);
        assert!((r.latitude_per_z - 1e-4).abs() < 1e-18);
        assert!((r.longitude_per_x - 1e-4).abs() < 1e-18);
        assert!((r.elevation_per_y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_derive_at_default_pose() {
        let geo = GeoModel::default();
        let pose = NavPose::default();
        let snap = geo.derive(&pose, &pose.position);

        assert!(snap.distance.abs() < 1e-12);
        // z = 10, y = 2 at the default pose
        assert!((snap.latitude - 60.2838).abs() < 1e-9);
        assert!((snap.longitude - 25.0267).abs() < 1e-9);
        assert!((snap.elevation - 147.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_euclidean_from_origin() {
        let geo = GeoModel::default();
        let mut pose = NavPose::default();
        let origin = pose.position;
        // 3-4-5 triangle in the ground plane
        pose.position.x += 3.0;
        pose.position.z += 4.0;
        let snap = geo.derive(&pose, &origin);
        assert!((snap.distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_coordinates_map_absolute_position() {
        let geo = GeoModel::default();
        let mut pose = NavPose::default();
        pose.position = Vector3::new(3.0, 2.0, 14.0);
        // Origin far away: distance changes, coordinates do not care
        let snap = geo.derive(&pose, &Vector3::new(100.0, 0.0, 100.0));
        assert!((snap.latitude - 60.2842).abs() < 1e-9);
        assert!((snap.longitude - 25.027).abs() < 1e-9);
        assert!((snap.elevation - 147.0).abs() < 1e-9);
    }

    #[test]
    fn test_derive_is_pure() {
        let geo = GeoModel::default();
        let mut pose = NavPose::default();
        pose.position = Vector3::new(-1.5, 2.0, 7.25);
        pose.yaw = 1.0;
        let origin = Vector3::new(0.0, 2.0, 10.0);
        let first = geo.derive(&pose, &origin);
        let second = geo.derive(&pose, &origin);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reference_builders() {
        let r = GeoReference::new()
            .with_base(-33.8688, 151.2093)
            .with_base_elevation(58.0)
            .with_axis_scales(2e-4, 3e-4);
        assert!((r.base_latitude - (-33.8688)).abs() < 1e-12);
        assert!((r.base_longitude - 151.2093).abs() < 1e-12);
        assert!((r.base_elevation - 58.0).abs() < 1e-12);
        assert!((r.latitude_per_z - 2e-4).abs() < 1e-18);
        assert!((r.longitude_per_x - 3e-4).abs() < 1e-18);
    }
}
