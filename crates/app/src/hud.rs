//! Top telemetry strip
//!
//! One wrapped row of live readouts: origin distance, mission runtime,
//! geographic fix in DMS, elevation, ambient temperature, link status,
//! battery, notifications and the wall clock.

use chrono::Local;
use eframe::egui;
use telemetry::{
    TelemetrySnapshot, format_distance, format_dms, format_elevation, format_runtime,
};

pub fn show_hud(
    ui: &mut egui::Ui,
    snap: &TelemetrySnapshot,
    runtime_seconds: u64,
    temperature_label: &str,
    battery_percent: u8,
    notifications: u32,
) {
    ui.horizontal_wrapped(|ui| {
        ui.label(format!("Distance: {}", format_distance(snap.distance)));
        ui.separator();
        ui.label(format!("Runtime: {}", format_runtime(runtime_seconds)));
        ui.separator();
        ui.label(format!(
            "Fix: {}  {}",
            format_dms(snap.latitude, true),
            format_dms(snap.longitude, false)
        ));
        ui.separator();
        ui.label(format!("Elevation: {}", format_elevation(snap.elevation)));
        ui.separator();
        ui.label(format!("Temp: {temperature_label}"));
        ui.separator();
        ui.colored_label(egui::Color32::GREEN, "● OK");
        ui.separator();
        ui.label(format!("Battery: {battery_percent}%"));
        ui.separator();
        ui.label(format!("Alerts: {notifications}"));
        ui.separator();
        ui.label(Local::now().format("%H:%M:%S").to_string());
    });
}
