use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

use nalgebra::Vector3;
use navcore::{DirectionFlags, FrameContext, Model, NavModel, NavState, StickVector};
use serde::{Deserialize, Serialize};

/// Per-step rates and thresholds for the dual-stick kinematics.
///
/// Every field is a per-frame increment, not a per-second rate: one engine
/// step applies these amounts once, regardless of wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTuning {
    /// Per-axis magnitude below which a stick axis reads as zero.
    pub dead_zone: f64,
    /// Per-axis magnitude above which a direction pip lights up.
    pub indicator_threshold: f64,
    /// Yaw/pitch radians per step per unit of right-stick deflection.
    pub look_rate: f64,
    /// Pitch is held inside +/- |pitch_limit| radians; the sign of the
    /// setting is ignored.
    pub pitch_limit: f64,
    /// Forward/back meters per step per unit of right-stick vertical.
    pub creep_speed: f64,
    /// Forward/back meters per step per unit of left-stick vertical.
    pub drive_speed: f64,
    /// Lateral meters per step per unit of left-stick horizontal.
    pub strafe_speed: f64,
    /// Yaw radians per step per unit of left-stick horizontal, applied
    /// together with the strafe displacement. Strafing leans into the
    /// turn; retune to 0.0 to decouple.
    pub strafe_yaw_coupling: f64,
}

impl Default for DriveTuning {
    fn default() -> Self {
        DriveTuning {
            dead_zone: 0.1,
            indicator_threshold: 0.2,
            look_rate: 0.02,
            pitch_limit: FRAC_PI_3, // +/- 60 degrees
            creep_speed: 0.05,      // right stick drives at half speed
            drive_speed: 0.1,
            strafe_speed: 0.1,
            strafe_yaw_coupling: 0.01,
        }
    }
}

impl DriveTuning {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dead-zone threshold (builder pattern)
    pub fn with_dead_zone(mut self, dead_zone: f64) -> Self {
        self.dead_zone = dead_zone;
        self
    }

    /// Set the look rate
    pub fn with_look_rate(mut self, look_rate: f64) -> Self {
        self.look_rate = look_rate;
        self
    }

    /// Set the pitch limit magnitude
    pub fn with_pitch_limit(mut self, pitch_limit: f64) -> Self {
        self.pitch_limit = pitch_limit.abs();
        self
    }

    /// Set one pace for the left stick's drive and strafe, keeping the
    /// right-stick creep at half of it
    pub fn with_drive_speed(mut self, drive_speed: f64) -> Self {
        self.drive_speed = drive_speed;
        self.strafe_speed = drive_speed;
        self.creep_speed = drive_speed / 2.0;
        self
    }

    /// Set the strafe speed
    pub fn with_strafe_speed(mut self, strafe_speed: f64) -> Self {
        self.strafe_speed = strafe_speed;
        self
    }

    /// Set the strafe-into-yaw coupling
    pub fn with_strafe_yaw_coupling(mut self, coupling: f64) -> Self {
        self.strafe_yaw_coupling = coupling;
        self
    }
}

/// Zero out each axis whose magnitude falls below the threshold.
/// Per-axis, strictly-less-than: a value exactly at the threshold passes.
pub fn apply_dead_zone(v: StickVector, threshold: f64) -> StickVector {
    StickVector {
        x: if v.x.abs() < threshold { 0.0 } else { v.x },
        y: if v.y.abs() < threshold { 0.0 } else { v.y },
    }
}

/// Which stick most recently changed; drives the direction pips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StickSide {
    #[default]
    Left,
    Right,
}

/// The dual-stick kinematic step.
///
/// Order inside one step is load-bearing: the right stick rotates first, so
/// every translation in the same step (right-stick creep and left-stick
/// drive/strafe) projects along the freshly updated yaw.
#[derive(Debug, Clone)]
pub struct StickDrive {
    pub tuning: DriveTuning,
    prev_left: StickVector,
    prev_right: StickVector,
    watched: StickSide,
}

impl StickDrive {
    pub fn new(tuning: DriveTuning) -> Self {
        StickDrive {
            tuning,
            prev_left: StickVector::default(),
            prev_right: StickVector::default(),
            watched: StickSide::Left,
        }
    }

    /// Move the position along a heading by `d` meters (negative is
    /// backward). Stick up maps to negative y upstream, so callers negate.
    fn advance(position: &mut Vector3<f64>, heading: f64, d: f64) {
        position.x += heading.sin() * d;
        position.z -= heading.cos() * d;
    }

    fn update_indicators(&mut self, state: &mut NavState, left: StickVector, right: StickVector) {
        // Raw latched command decides which stick changed; simultaneous
        // changes resolve to the left stick.
        if state.command.left != self.prev_left {
            self.watched = StickSide::Left;
        } else if state.command.right != self.prev_right {
            self.watched = StickSide::Right;
        }
        self.prev_left = state.command.left;
        self.prev_right = state.command.right;

        let source = match self.watched {
            StickSide::Left => left,
            StickSide::Right => right,
        };
        state.indicators = DirectionFlags::from_stick(source, self.tuning.indicator_threshold);
    }
}

impl Default for StickDrive {
    fn default() -> Self {
        StickDrive::new(DriveTuning::default())
    }
}

impl Model for StickDrive {
    fn reset(&mut self) {
        self.prev_left = StickVector::default();
        self.prev_right = StickVector::default();
        self.watched = StickSide::Left;
    }
}

impl NavModel for StickDrive {
    fn step_nav(&mut self, _ctx: FrameContext, state: &mut NavState) {
        let t = self.tuning.clone();
        let left = apply_dead_zone(state.command.left, t.dead_zone);
        let right = apply_dead_zone(state.command.right, t.dead_zone);

        // Right stick first: look, then creep along the new yaw.
        state.pose.yaw += -right.x * t.look_rate;
        let pitch_limit = t.pitch_limit.abs();
        state.pose.pitch =
            (state.pose.pitch - right.y * t.look_rate).clamp(-pitch_limit, pitch_limit);

        let creep = -right.y * t.creep_speed;
        if creep != 0.0 {
            Self::advance(&mut state.pose.position, state.pose.yaw, creep);
        }

        // Left stick: drive along yaw, then strafe perpendicular to it.
        let drive = -left.y * t.drive_speed;
        if drive != 0.0 {
            Self::advance(&mut state.pose.position, state.pose.yaw, drive);
        }

        let strafe = left.x * t.strafe_speed;
        if strafe != 0.0 {
            Self::advance(&mut state.pose.position, state.pose.yaw + FRAC_PI_2, strafe);
            state.pose.yaw += -left.x * t.strafe_yaw_coupling;
        }

        self.update_indicators(state, left, right);
    }
}
