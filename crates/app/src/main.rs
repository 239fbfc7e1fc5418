//! Dual-stick tele-operation navigation console.
//!
//! Features:
//! - Two on-screen joystick pads driving a fixed-step navigation engine
//! - Geolocation HUD with DMS fix, origin distance and mission runtime
//! - Attitude gauges, direction pips and a top-down diagnostic viewport
//!
//! Controls:
//! - Left pad: drive forward/backward, strafe (strafing leans into the turn)
//! - Right pad: look yaw/pitch, slow creep on the vertical axis
//! - STOP releases both sticks and resets the pose; Reset also restores
//!   the speed multiplier

mod app;
mod config;
mod gauge;
mod hud;
mod joystick_pad;

use std::path::Path;

use eframe::egui;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::app::ConsoleApp;
use crate::config::load_or_default;

const PROFILE_PATH: &str = "console_profile.json";

fn main() -> eframe::Result {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let profile = load_or_default(Path::new(PROFILE_PATH));
    info!("starting console: {}", profile.title);

    let title = profile.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 1000.0])
            .with_title(&title),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ConsoleApp::new(profile)))),
    )
}
