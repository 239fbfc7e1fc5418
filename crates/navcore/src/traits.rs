use std::f64::consts::TAU;

use nalgebra::Vector3;

// Input types

/// Normalized 2D stick deflection. Both axes live in [-1, 1] and the
/// Euclidean magnitude is held to <= 1 by `clamped`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickVector {
    pub x: f64,
    pub y: f64,
}

impl StickVector {
    pub fn new(x: f64, y: f64) -> Self {
        StickVector { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Exact-zero check. The engine state machine keys off literal zero,
    /// not a tolerance.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Clamp the Euclidean magnitude to <= 1, preserving direction.
    pub fn clamped(self) -> StickVector {
        let mag = self.magnitude();
        if mag > 1.0 {
            StickVector {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickCommand {
    pub left: StickVector,
    pub right: StickVector,
}

// Pose types

/// Camera/vehicle pose. Yaw accumulates without wrapping so the kinematic
/// step never sees a discontinuity; `yaw_wrapped` is the reporting view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPose {
    pub position: Vector3<f64>,
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for NavPose {
    fn default() -> Self {
        NavPose {
            position: Vector3::new(0.0, 2.0, 10.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl NavPose {
    /// Yaw folded into [0, 2*pi) for external consumers.
    pub fn yaw_wrapped(&self) -> f64 {
        self.yaw.rem_euclid(TAU)
    }
}

// Derived display state

/// Direction pips derived from stick deflection. Display aid only, never
/// fed back into the kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionFlags {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl DirectionFlags {
    /// Stick up is negative y, so forward keys off `y < -threshold`.
    pub fn from_stick(v: StickVector, threshold: f64) -> Self {
        DirectionFlags {
            left: v.x < -threshold,
            right: v.x > threshold,
            forward: v.y < -threshold,
            backward: v.y > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Idle,
    Active,
    Resetting,
}

// General

/// The single mutable navigation state threaded through models: the pose,
/// the origin snapshot distance telemetry measures from, the latched
/// per-frame stick command, and derived display state.
#[derive(Debug, Clone)]
pub struct NavState {
    pub pose: NavPose,
    pub origin: Vector3<f64>,
    pub command: StickCommand,
    pub status: EngineStatus,
    pub indicators: DirectionFlags,
}

impl Default for NavState {
    fn default() -> Self {
        let pose = NavPose::default();
        NavState {
            origin: pose.position,
            pose,
            command: StickCommand::default(),
            status: EngineStatus::Idle,
            indicators: DirectionFlags::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub frame: u64,
}

pub trait Model {
    fn reset(&mut self);
}

pub trait NavModel: Model {
    fn step_nav(&mut self, ctx: FrameContext, state: &mut NavState);
}
