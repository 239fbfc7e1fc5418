//! Operator console application
//!
//! One engine step per rendered frame, fed by the two on-screen joystick
//! pads. Everything kinematic is read back from the engine; the console
//! only holds presentation state (lights, mode selectors, runtime counter,
//! plot traces).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use kinematics::NavEngine;
use log::info;
use navcore::EngineStatus;
use telemetry::{GeoModel, compass_direction, heading_degrees, zoom_percentage};

use crate::config::{ConsoleProfile, DriveMode, MapView};
use crate::gauge::show_gauge;
use crate::hud::show_hud;
use crate::joystick_pad::JoystickPad;

const PLOT_DT: f64 = 0.1;
const PAD_SIZE: f32 = 160.0;
const GAUGE_SIZE: f32 = 110.0;
const SPEED_MULTIPLIERS: [f64; 3] = [2.0, 1.0, 0.5];
const INDICATOR_AMBER: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);

struct Trace {
    t: VecDeque<f64>,
    speed: VecDeque<f64>,
    distance: VecDeque<f64>,
    px: VecDeque<f64>,
    pz: VecDeque<f64>,
    capacity: usize,
}

impl Trace {
    fn new(seconds: f64, sample_dt: f64) -> Self {
        let capacity = (seconds / sample_dt).ceil() as usize + 1;
        Self {
            t: VecDeque::with_capacity(capacity),
            speed: VecDeque::with_capacity(capacity),
            distance: VecDeque::with_capacity(capacity),
            px: VecDeque::with_capacity(capacity),
            pz: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, t: f64, speed: f64, distance: f64, px: f64, pz: f64) {
        self.t.push_back(t);
        self.speed.push_back(speed);
        self.distance.push_back(distance);
        self.px.push_back(px);
        self.pz.push_back(pz);
        self.trim();
    }

    fn trim(&mut self) {
        while self.t.len() > self.capacity {
            self.t.pop_front();
        }
        while self.speed.len() > self.capacity {
            self.speed.pop_front();
        }
        while self.distance.len() > self.capacity {
            self.distance.pop_front();
        }
        while self.px.len() > self.capacity {
            self.px.pop_front();
        }
        while self.pz.len() > self.capacity {
            self.pz.pop_front();
        }
    }

    fn line<'a>(points: &'a VecDeque<f64>, t: &'a VecDeque<f64>) -> PlotPoints<'a> {
        PlotPoints::from_iter(
            t.iter()
                .copied()
                .zip(points.iter().copied())
                .map(|(x, y)| [x, y]),
        )
    }
}

pub struct ConsoleApp {
    engine: NavEngine,
    geo: GeoModel,
    left_pad: JoystickPad,
    right_pad: JoystickPad,

    drive_mode: DriveMode,
    map_view: MapView,
    speed_multiplier: f64,
    temperature_label: String,
    battery_percent: u8,
    notifications: u32,

    light: bool,
    spot_light: bool,
    laser: bool,

    runtime_seconds: u64,
    runtime_accum: f64,

    t: f64,
    window_s: f64,
    last_frame: Instant,
    view_scale: f32,
    trace: Trace,
}

impl ConsoleApp {
    pub fn new(profile: ConsoleProfile) -> Self {
        ConsoleApp {
            engine: NavEngine::new(profile.tuning.clone()),
            geo: GeoModel::new(profile.geo.clone()),
            left_pad: JoystickPad::new("DRIVE"),
            right_pad: JoystickPad::new("LOOK"),
            drive_mode: profile.drive_mode,
            map_view: profile.map_view,
            speed_multiplier: profile.speed_multiplier,
            temperature_label: profile.temperature_label,
            battery_percent: profile.battery_percent,
            notifications: profile.notifications,
            light: false,
            spot_light: false,
            laser: false,
            runtime_seconds: profile.runtime_seed_seconds,
            runtime_accum: 0.0,
            t: 0.0,
            window_s: 20.0,
            last_frame: Instant::now(),
            view_scale: 24.0,
            trace: Trace::new(20.0, PLOT_DT),
        }
    }

    fn advance_runtime(&mut self, wall_dt: f64) {
        self.t += wall_dt;
        self.runtime_accum += wall_dt;
        while self.runtime_accum >= 1.0 {
            self.runtime_accum -= 1.0;
            self.runtime_seconds += 1;
        }
    }

    /// Emergency stop: release both sticks and put the pose, camera and
    /// lights back to their defaults.
    fn stop(&mut self) {
        self.left_pad.end();
        self.right_pad.end();
        self.engine.request_reset();
        self.engine.set_zoom(1.0);
        self.light = false;
        self.spot_light = false;
        self.laser = false;
        info!("emergency stop");
    }

    /// Everything `stop` does, plus the speed multiplier selection.
    fn full_reset(&mut self) {
        self.stop();
        self.speed_multiplier = 0.5;
    }

    fn draw_viewport(&self, ui: &mut egui::Ui, height_px: f32) {
        let desired = egui::vec2(ui.available_width(), height_px);
        let (response, painter) = ui.allocate_painter(desired, egui::Sense::hover());

        let pose = self.engine.pose();
        let pos = pose.position;
        let yaw = pose.yaw;
        let (cx, cz) = (pos.x, pos.z);
        let scale = self.view_scale * self.engine.zoom() as f32;

        // World x runs right on screen, world z runs down; forward (-z) is up
        let to_screen = |wx: f64, wz: f64| -> egui::Pos2 {
            let sx = ((wx - cx) as f32) * scale + response.rect.center().x;
            let sy = ((wz - cz) as f32) * scale + response.rect.center().y;
            egui::pos2(sx, sy)
        };

        painter.rect_filled(response.rect, 4.0, ui.visuals().extreme_bg_color);

        // 1 m grid, snapped to whole world coordinates
        let bg = ui.visuals().weak_text_color();
        let half_w = response.rect.width() / 2.0;
        let half_h = response.rect.height() / 2.0;
        let n_x = (half_w / scale).ceil() as i32 + 2;
        let n_z = (half_h / scale).ceil() as i32 + 2;
        for ix in -n_x..=n_x {
            let wx = cx.floor() + ix as f64;
            let p1 = to_screen(wx, cz - n_z as f64);
            let p2 = to_screen(wx, cz + n_z as f64);
            painter.line_segment([p1, p2], egui::Stroke::new(1.0, bg));
        }
        for iz in -n_z..=n_z {
            let wz = cz.floor() + iz as f64;
            let p1 = to_screen(cx - n_x as f64, wz);
            let p2 = to_screen(cx + n_x as f64, wz);
            painter.line_segment([p1, p2], egui::Stroke::new(1.0, bg));
        }

        // World frame at (0, 0)
        let frame = to_screen(0.0, 0.0);
        painter.line_segment(
            [frame, to_screen(1.0, 0.0)],
            egui::Stroke::new(3.0, egui::Color32::RED),
        );
        painter.line_segment(
            [frame, to_screen(0.0, 1.0)],
            egui::Stroke::new(3.0, egui::Color32::GREEN),
        );
        painter.text(
            to_screen(1.1, 0.0),
            egui::Align2::LEFT_CENTER,
            "X",
            egui::FontId::monospace(12.0),
            egui::Color32::RED,
        );
        painter.text(
            to_screen(0.0, 1.15),
            egui::Align2::CENTER_TOP,
            "Z",
            egui::FontId::monospace(12.0),
            egui::Color32::GREEN,
        );

        // Telemetry origin the distance readout measures from
        let origin = self.engine.origin();
        painter.circle_stroke(
            to_screen(origin.x, origin.z),
            6.0,
            egui::Stroke::new(2.0, INDICATOR_AMBER),
        );

        // Path trace
        if self.trace.px.len() > 1 {
            let points: Vec<egui::Pos2> = self
                .trace
                .px
                .iter()
                .copied()
                .zip(self.trace.pz.iter().copied())
                .map(|(x, z)| to_screen(x, z))
                .collect();
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE),
            ));
        }

        // Camera frustum from yaw and the zoom-derived field of view
        let half_fov = (self.engine.fov() / 2.0).to_radians();
        for a in [yaw - half_fov, yaw + half_fov] {
            let edge = to_screen(pos.x + a.sin() * 2.5, pos.z - a.cos() * 2.5);
            painter.line_segment([to_screen(pos.x, pos.z), edge], egui::Stroke::new(1.0, bg));
        }

        // Vehicle marker and heading arrow
        let vehicle = to_screen(pos.x, pos.z);
        let nose = to_screen(pos.x + yaw.sin() * 0.8, pos.z - yaw.cos() * 0.8);
        painter.line_segment(
            [vehicle, nose],
            egui::Stroke::new(3.0, egui::Color32::from_rgb(255, 100, 100)),
        );
        painter.circle_filled(vehicle, 5.0, egui::Color32::WHITE);

        painter.text(
            response.rect.left_top() + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            format!(
                "{} · FOV {:.0}°",
                self.map_view.label(),
                self.engine.fov()
            ),
            egui::FontId::monospace(12.0),
            bg,
        );
    }

    fn show_deck(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Mode:");
            for mode in DriveMode::ALL {
                if ui
                    .selectable_label(self.drive_mode == mode, mode.label())
                    .clicked()
                {
                    self.drive_mode = mode;
                }
            }
            ui.separator();
            ui.label("Multiplier:");
            for m in SPEED_MULTIPLIERS {
                if ui
                    .selectable_label(self.speed_multiplier == m, format!("{m}x"))
                    .clicked()
                {
                    self.speed_multiplier = m;
                }
            }
            ui.separator();
            ui.checkbox(&mut self.light, "Light");
            ui.checkbox(&mut self.spot_light, "Spot");
            ui.checkbox(&mut self.laser, "Laser");
            ui.separator();
            if ui.button("Zoom −").clicked() {
                self.engine.zoom_out();
            }
            ui.label(format!("{}%", zoom_percentage(self.engine.zoom())));
            if ui.button("Zoom +").clicked() {
                self.engine.zoom_in();
            }
            ui.separator();
            if ui
                .add(egui::Button::new(egui::RichText::new("STOP").strong()).fill(egui::Color32::DARK_RED))
                .clicked()
            {
                self.stop();
            }
            if ui.button("Reset").clicked() {
                self.full_reset();
            }
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            self.left_pad.show(ui, PAD_SIZE);
            ui.add_space(12.0);

            let pose = self.engine.pose();
            let heading = heading_degrees(pose.yaw);
            let pitch_deg = pose.pitch.to_degrees();
            // Bank estimate from lateral stick, presentation only
            let roll_deg = (self.engine.command().left.x * 180.0).round();
            show_gauge(ui, GAUGE_SIZE, pitch_deg, None, "PITCH");
            show_gauge(
                ui,
                GAUGE_SIZE,
                heading,
                Some(compass_direction(heading)),
                "HEADING",
            );
            show_gauge(ui, GAUGE_SIZE, roll_deg, None, "ROLL");
            ui.add_space(12.0);

            ui.vertical(|ui| {
                let status = self.engine.status();
                let color = match status {
                    EngineStatus::Idle => ui.visuals().weak_text_color(),
                    EngineStatus::Active => egui::Color32::GREEN,
                    EngineStatus::Resetting => egui::Color32::YELLOW,
                };
                ui.colored_label(color, format!("{status:?}"));

                let ind = self.engine.indicators();
                ui.horizontal(|ui| {
                    pip(ui, ind.left, "◀");
                    pip(ui, ind.forward, "▲");
                    pip(ui, ind.backward, "▼");
                    pip(ui, ind.right, "▶");
                });

                let speed = self.engine.command().left.y.abs();
                ui.label(format!("Speed: {speed:.1} m/s"));
                ui.label(format!(
                    "{} · {}x",
                    self.drive_mode.label(),
                    self.speed_multiplier
                ));
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.right_pad.show(ui, PAD_SIZE);
            });
        });
    }
}

fn pip(ui: &mut egui::Ui, lit: bool, glyph: &str) {
    let color = if lit {
        INDICATOR_AMBER
    } else {
        ui.visuals().weak_text_color()
    };
    ui.colored_label(color, glyph);
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let wall_dt = now.duration_since(self.last_frame).as_secs_f64().min(0.25);
        self.last_frame = now;
        self.advance_runtime(wall_dt);

        self.engine
            .step(self.left_pad.vector(), self.right_pad.vector());
        let origin = self.engine.origin();
        let snap = self.geo.derive(self.engine.pose(), &origin);

        if self.trace.t.back().copied().unwrap_or(f64::NEG_INFINITY) + PLOT_DT <= self.t {
            let speed = self.engine.command().left.y.abs();
            let pos = self.engine.pose().position;
            self.trace.push(self.t, speed, snap.distance, pos.x, pos.z);
        }

        egui::TopBottomPanel::top("hud").show(ctx, |ui| {
            show_hud(
                ui,
                &snap,
                self.runtime_seconds,
                &self.temperature_label,
                self.battery_percent,
                self.notifications,
            );
        });

        egui::TopBottomPanel::bottom("deck").show(ctx, |ui| {
            self.show_deck(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for view in MapView::ALL {
                    if ui
                        .selectable_label(self.map_view == view, view.label())
                        .clicked()
                    {
                        self.map_view = view;
                    }
                }
            });
            self.draw_viewport(ui, 360.0);

            ui.separator();

            ui.columns(2, |columns| {
                columns[0].heading("Speed");
                Plot::new("speed_plot")
                    .legend(Legend::default())
                    .allow_scroll(false)
                    .height(140.0)
                    .show(&mut columns[0], |plot_ui| {
                        let x_min = (self.t - self.window_s).max(0.0);
                        let x_max = self.t.max(self.window_s * 0.1);
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [x_min, -0.05],
                            [x_max, 1.1],
                        ));
                        plot_ui.line(Line::new(
                            "|left y| (m/s)",
                            Trace::line(&self.trace.speed, &self.trace.t),
                        ));
                    });

                columns[1].heading("Origin distance");
                Plot::new("distance_plot")
                    .legend(Legend::default())
                    .allow_scroll(false)
                    .height(140.0)
                    .show(&mut columns[1], |plot_ui| {
                        let x_min = (self.t - self.window_s).max(0.0);
                        let x_max = self.t.max(self.window_s * 0.1);
                        let d_max = self.trace.distance.iter().cloned().fold(1.0_f64, f64::max);
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [x_min, 0.0],
                            [x_max, d_max * 1.1],
                        ));
                        plot_ui.line(Line::new(
                            "distance (m)",
                            Trace::line(&self.trace.distance, &self.trace.t),
                        ));
                    });
            });
        });

        ctx.request_repaint_after(Duration::from_millis(10));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navcore::{NavPose, StickVector};

    fn console() -> ConsoleApp {
        ConsoleApp::new(ConsoleProfile::default())
    }

    #[test]
    fn test_stop_releases_everything() {
        let mut app = console();
        app.light = true;
        app.spot_light = true;
        app.laser = true;
        app.engine.set_zoom(2.0);
        for _ in 0..20 {
            app.engine
                .step(StickVector::new(0.0, -1.0), StickVector::new(1.0, 0.0));
        }

        app.stop();
        assert_eq!(*app.engine.pose(), NavPose::default());
        assert_eq!(app.engine.status(), EngineStatus::Resetting);
        assert!((app.engine.zoom() - 1.0).abs() < 1e-12);
        assert!(!app.light && !app.spot_light && !app.laser);
        assert!(app.left_pad.vector().is_zero());
        assert!(app.right_pad.vector().is_zero());
    }

    #[test]
    fn test_stop_keeps_multiplier_selection() {
        let mut app = console();
        app.speed_multiplier = 2.0;
        app.stop();
        assert!((app.speed_multiplier - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_reset_restores_multiplier() {
        let mut app = console();
        app.speed_multiplier = 2.0;
        app.full_reset();
        assert!((app.speed_multiplier - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_runtime_counts_whole_seconds() {
        let mut app = console();
        let seed = app.runtime_seconds;
        for _ in 0..10 {
            app.advance_runtime(0.25);
        }
        assert_eq!(app.runtime_seconds, seed + 2);
        app.advance_runtime(0.5);
        assert_eq!(app.runtime_seconds, seed + 3);
    }

    #[test]
    fn test_trace_ring_buffer_trims() {
        let mut trace = Trace::new(1.0, 0.1);
        for i in 0..100 {
            trace.push(i as f64 * 0.1, 0.0, 0.0, 0.0, 0.0);
        }
        assert!(trace.t.len() <= trace.capacity);
        let expected_front = (100 - trace.capacity) as f64 * 0.1;
        assert!((trace.t.front().copied().unwrap() - expected_front).abs() < 1e-9);
    }
}
