use std::ops::Range;

use kinematics::NavEngine;
use navcore::StickVector;
use plotters::prelude::*;

fn extrema(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Pad a data range by 5% so the trace clears the plot frame.
fn padded(min: f64, max: f64) -> Range<f64> {
    let span = (max - min).max(1e-6);
    (min - span * 0.05)..(max + span * 0.05)
}

fn draw_trace(
    filename: &str,
    title: &str,
    axes: (&str, &str),
    series: &str,
    x: &[f64],
    y: &[f64],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(filename, (900, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = extrema(x);
    let (y_min, y_max) = extrema(y);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(padded(x_min, x_max), padded(y_min, y_max))?;

    chart.configure_mesh().x_desc(axes.0).y_desc(axes.1).draw()?;

    chart
        .draw_series(LineSeries::new(
            x.iter().copied().zip(y.iter().copied()),
            &BLUE,
        ))?
        .label(series)
        .legend(|(lx, ly)| PathElement::new(vec![(lx, ly), (lx + 20, ly)], BLUE.filled()));

    // Mark where the run starts
    if let (Some(&x0), Some(&y0)) = (x.first(), y.first()) {
        chart.draw_series(std::iter::once(Circle::new((x0, y0), 4, RED.filled())))?;
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = NavEngine::default();

    // Scripted stick sequence: (left, right, steps) per phase
    let phases = [
        // Drive straight ahead
        (StickVector::new(0.0, -1.0), StickVector::new(0.0, 0.0), 100),
        // Full right strafe; the yaw coupling curls the path
        (StickVector::new(1.0, 0.0), StickVector::new(0.0, 0.0), 150),
        // Turn with the right stick while creeping forward
        (StickVector::new(0.0, 0.0), StickVector::new(0.5, -1.0), 200),
        // Drive out along the new heading
        (StickVector::new(0.0, -1.0), StickVector::new(0.0, 0.0), 100),
    ];

    let mut xs = Vec::new();
    let mut zs = Vec::new();
    let mut steps = Vec::new();
    let mut yaw_deg = Vec::new();

    let mut n = 0;
    for (left, right, count) in phases {
        for _ in 0..count {
            engine.step(left, right);
            let pose = engine.pose();
            xs.push(pose.position.x);
            zs.push(pose.position.z);
            steps.push(n as f64);
            // Accumulated yaw, not wrapped, so the trace stays continuous
            yaw_deg.push(pose.yaw.to_degrees());
            n += 1;
        }
    }

    draw_trace(
        "drive_path.png",
        "Drive Path (top-down)",
        ("X [m]", "Z [m]"),
        "path",
        &xs,
        &zs,
    )?;

    draw_trace(
        "drive_yaw.png",
        "Yaw vs Step",
        ("Step [-]", "Yaw [deg]"),
        "yaw",
        &steps,
        &yaw_deg,
    )?;

    println!("Wrote plots: drive_path.png, drive_yaw.png");

    Ok(())
}
