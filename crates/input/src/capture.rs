//! Pointer/touch gesture capture for a circular stick widget.
//!
//! A capture converts host pointer positions into a `StickVector`. The
//! gesture center is latched when the contact begins and is not re-measured,
//! so dragging far outside the widget keeps producing meaningful deflection
//! as long as the host routes the pointer here.

use log::debug;
use navcore::StickVector;

/// Measured widget rectangle, stored as center plus half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadBounds {
    pub center_x: f64,
    pub center_y: f64,
    pub half_width: f64,
    pub half_height: f64,
}

impl PadBounds {
    pub fn new(center_x: f64, center_y: f64, half_width: f64, half_height: f64) -> Self {
        PadBounds {
            center_x,
            center_y,
            half_width,
            half_height,
        }
    }

    /// Build from a top-left origin and a size, the way host toolkits
    /// report widget rectangles.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        PadBounds {
            center_x: x + width / 2.0,
            center_y: y + height / 2.0,
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    /// A zero-area rectangle is what an unmounted widget measures as;
    /// gestures against it are ignored.
    pub fn is_degenerate(&self) -> bool {
        !(self.half_width > 0.0 && self.half_height > 0.0)
    }

    fn vector_to(&self, px: f64, py: f64) -> StickVector {
        StickVector::new(
            (px - self.center_x) / self.half_width,
            (py - self.center_y) / self.half_height,
        )
        .clamped()
    }
}

/// One stick's gesture tracker. At most one contact is tracked at a time;
/// a second concurrent contact is ignored until the first releases.
#[derive(Debug, Default)]
pub struct StickCapture {
    gesture: Option<PadBounds>,
    vector: StickVector,
}

impl StickCapture {
    pub fn new() -> Self {
        StickCapture::default()
    }

    /// Begin a gesture at `(px, py)` against the widget's measured bounds.
    /// Latches the center for the rest of the gesture and emits the initial
    /// deflection. Ignored while a gesture is already active or when the
    /// bounds are degenerate.
    pub fn begin(&mut self, bounds: PadBounds, px: f64, py: f64) -> StickVector {
        if self.gesture.is_some() || bounds.is_degenerate() {
            return self.vector;
        }
        self.vector = bounds.vector_to(px, py);
        self.gesture = Some(bounds);
        debug!(
            "gesture acquired at ({:.1}, {:.1}), deflection ({:.3}, {:.3})",
            px, py, self.vector.x, self.vector.y
        );
        self.vector
    }

    /// Update the deflection from a new pointer position. Positions outside
    /// the widget are fine; everything is measured against the latched
    /// center. No-op while inactive.
    pub fn move_to(&mut self, px: f64, py: f64) -> StickVector {
        if let Some(bounds) = self.gesture {
            self.vector = bounds.vector_to(px, py);
        }
        self.vector
    }

    /// Release the gesture. Always emits exactly (0, 0); calling it with no
    /// gesture active is harmless.
    pub fn end(&mut self) -> StickVector {
        if self.gesture.take().is_some() {
            debug!("gesture released");
        }
        self.vector = StickVector::default();
        self.vector
    }

    /// Latest emitted deflection.
    pub fn vector(&self) -> StickVector {
        self.vector
    }

    pub fn active(&self) -> bool {
        self.gesture.is_some()
    }
}
