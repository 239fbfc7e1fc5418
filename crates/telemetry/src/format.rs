//! Display formatting for telemetry readouts
//!
//! Pure string formatters for the operator console. Numeric conventions
//! follow marine chart-plotter practice: DMS components are floored, the
//! compass rose is eight-way and headings live in [0, 360).

const COMPASS_ROSE: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Distance in meters at millimeter precision.
pub fn format_distance(meters: f64) -> String {
    format!("{:.3} m", meters)
}

/// Decimal degrees as `D°M'S" H` with the hemisphere taken from the sign.
/// Components are floored, not rounded, and carry no zero padding.
pub fn format_dms(decimal: f64, is_latitude: bool) -> String {
    let abs = decimal.abs();
    let degrees = abs.floor();
    let minutes = ((abs - degrees) * 60.0).floor();
    let seconds = (((abs - degrees) * 60.0 - minutes) * 60.0).floor();
    let hemisphere = match (is_latitude, decimal >= 0.0) {
        (true, true) => "N",
        (true, false) => "S",
        (false, true) => "E",
        (false, false) => "W",
    };
    format!(
        "{}°{}'{}\" {}",
        degrees as u32, minutes as u32, seconds as u32, hemisphere
    )
}

/// Elevation rounded to whole meters.
pub fn format_elevation(meters: f64) -> String {
    format!("{} m", meters.round() as i64)
}

/// Seconds of runtime as `Hh MMm SSs`. Hours run unpadded; minutes and
/// seconds are zero-padded to two digits.
pub fn format_runtime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Nearest eight-way compass point for a heading in degrees.
pub fn compass_direction(degrees: f64) -> &'static str {
    let sector = ((degrees / 45.0).round() as isize).rem_euclid(8) as usize;
    COMPASS_ROSE[sector]
}

/// Compass heading in [0, 360) for an engine yaw in radians.
///
/// Yaw is counterclockwise-positive about +y while compass headings grow
/// clockwise, hence the sign flip before wrapping.
pub fn heading_degrees(yaw: f64) -> f64 {
    (-yaw).to_degrees().rem_euclid(360.0)
}

/// Zoom factor as a whole-number percentage.
pub fn zoom_percentage(zoom: f64) -> u32 {
    (zoom * 100.0).round() as u32
}
