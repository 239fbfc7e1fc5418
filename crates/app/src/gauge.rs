//! Painter-drawn attitude gauges
//!
//! Circular dial with eight tick marks, a dashed outer ring and a needle
//! that points straight up at zero and swings clockwise for positive
//! degrees. The readout always shows the magnitude; sign lives in the
//! needle.

use eframe::egui;

const NEEDLE_AMBER: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);

pub fn show_gauge(ui: &mut egui::Ui, size: f32, value_degrees: f64, direction: Option<&str>, label: &str) {
    let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer_r = size * 0.45;
    let inner_r = size * 0.35;

    // Dashed outer ring
    let ring: Vec<egui::Pos2> = (0..=64)
        .map(|i| {
            let a = i as f32 / 64.0 * std::f32::consts::TAU;
            egui::pos2(center.x + a.sin() * outer_r, center.y - a.cos() * outer_r)
        })
        .collect();
    painter.extend(egui::Shape::dashed_line(
        &ring,
        egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
        3.0,
        3.0,
    ));

    painter.circle_stroke(
        center,
        inner_r,
        egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
    );

    // Eight tick marks
    for i in 0..8 {
        let a = i as f32 * std::f32::consts::FRAC_PI_4;
        let dir = egui::vec2(a.sin(), -a.cos());
        let p1 = center + dir * (outer_r * 0.88);
        let p2 = center + dir * outer_r;
        painter.line_segment([p1, p2], egui::Stroke::new(1.5, ui.visuals().weak_text_color()));
    }

    // Needle, up at zero and clockwise positive
    let a = value_degrees.to_radians() as f32;
    let tip = center + egui::vec2(a.sin(), -a.cos()) * (inner_r * 0.85);
    painter.line_segment([center, tip], egui::Stroke::new(2.0, NEEDLE_AMBER));
    painter.circle_filled(center, 2.5, NEEDLE_AMBER);

    painter.text(
        egui::pos2(center.x, center.y + inner_r * 0.45),
        egui::Align2::CENTER_CENTER,
        format!("{}°", value_degrees.abs().round() as i64),
        egui::FontId::monospace(13.0),
        ui.visuals().strong_text_color(),
    );
    if let Some(dir) = direction {
        painter.text(
            egui::pos2(center.x, center.y + inner_r * 0.75),
            egui::Align2::CENTER_CENTER,
            dir,
            egui::FontId::proportional(11.0),
            NEEDLE_AMBER,
        );
    }
    painter.text(
        egui::pos2(center.x, rect.max.y - 1.0),
        egui::Align2::CENTER_BOTTOM,
        label,
        egui::FontId::proportional(11.0),
        ui.visuals().weak_text_color(),
    );
}
