//! On-screen joystick pad widget
//!
//! A circular drag surface feeding a `StickCapture`. The gesture center
//! latches to the widget rect at drag start and the pointer keeps steering
//! the capture wherever it goes afterwards, so sweeping off the pad never
//! drops the stick.

use eframe::egui;
use input::{PadBounds, StickCapture};
use navcore::StickVector;

const PAD_AMBER: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);
// Handle travel as a fraction of the pad size per unit of deflection
const HANDLE_TRAVEL: f32 = 0.40;

pub struct JoystickPad {
    capture: StickCapture,
    label: &'static str,
}

impl JoystickPad {
    pub fn new(label: &'static str) -> Self {
        JoystickPad {
            capture: StickCapture::default(),
            label,
        }
    }

    /// Latest captured deflection.
    pub fn vector(&self) -> StickVector {
        self.capture.vector()
    }

    /// Force-release the gesture, zeroing the deflection.
    pub fn end(&mut self) -> StickVector {
        self.capture.end()
    }

    /// Draw the pad and feed its drag gesture into the capture.
    pub fn show(&mut self, ui: &mut egui::Ui, size: f32) {
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::drag());
        let rect = response.rect;

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                let bounds = PadBounds::from_origin_size(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.width() as f64,
                    rect.height() as f64,
                );
                self.capture.begin(bounds, pos.x as f64, pos.y as f64);
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.capture.move_to(pos.x as f64, pos.y as f64);
            }
        }
        if response.drag_stopped() {
            self.capture.end();
        }

        let center = rect.center();
        let radius = size * 0.5;

        painter.circle_filled(center, radius, ui.visuals().extreme_bg_color);
        painter.circle_stroke(center, radius - 1.0, egui::Stroke::new(2.0, PAD_AMBER));

        // Cardinal markers just inside the rim
        let dot_r = size * 0.02;
        let inset = radius * 0.92;
        for (dx, dy) in [(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)] {
            let p = egui::pos2(center.x + dx * inset, center.y + dy * inset);
            painter.circle_filled(p, dot_r, egui::Color32::WHITE);
        }

        let v = self.capture.vector();
        let handle = egui::pos2(
            center.x + v.x as f32 * HANDLE_TRAVEL * size,
            center.y + v.y as f32 * HANDLE_TRAVEL * size,
        );
        painter.circle_filled(handle, size * 0.2, PAD_AMBER);
        painter.circle_stroke(
            handle,
            size * 0.2,
            egui::Stroke::new(2.0, egui::Color32::WHITE),
        );

        painter.text(
            egui::pos2(center.x, rect.max.y - 2.0),
            egui::Align2::CENTER_BOTTOM,
            self.label,
            egui::FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );
    }
}
