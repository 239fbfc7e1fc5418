//! Navigation Engine
//!
//! Owns the navigation state and advances it one fixed discrete step per
//! host frame. The host render loop is an external collaborator: it calls
//! `step` once per rendered frame with the latest captured stick vectors
//! and reads the pose back out. Reset and zoom requests arrive between
//! steps on the same thread, so they can never interleave with one.

use log::{debug, info};
use nalgebra::Vector3;
use navcore::{
    DirectionFlags, EngineStatus, FrameContext, Model, NavModel, NavPose, NavState, StickCommand,
    StickVector,
};

use crate::drive::{DriveTuning, StickDrive, apply_dead_zone};

const ZOOM_MIN: f64 = 0.5;
const ZOOM_MAX: f64 = 2.0;
const ZOOM_STEP: f64 = 0.5;
const BASE_FOV: f64 = 75.0;

/// The navigation engine: state machine, drive model, zoom.
pub struct NavEngine {
    state: NavState,
    drive: StickDrive,
    zoom: f64,
    frame: u64,
}

impl NavEngine {
    pub fn new(tuning: DriveTuning) -> Self {
        NavEngine {
            state: NavState::default(),
            drive: StickDrive::new(tuning),
            zoom: 1.0,
            frame: 0,
        }
    }

    /// Advance one fixed step with the given stick deflections.
    ///
    /// Inputs are magnitude-clamped here as well, so out-of-range values
    /// from a misbehaving host degrade to rim deflection instead of
    /// breaking the pose invariants.
    pub fn step(&mut self, left: StickVector, right: StickVector) {
        self.frame += 1;
        let ctx = FrameContext { frame: self.frame };

        // A reset landed before this frame; its pose is already applied.
        if self.state.status == EngineStatus::Resetting {
            self.state.status = EngineStatus::Idle;
        }

        self.state.command.left = left.clamped();
        self.state.command.right = right.clamped();

        self.drive.step_nav(ctx, &mut self.state);

        let dead_zone = self.drive.tuning.dead_zone;
        let l = apply_dead_zone(self.state.command.left, dead_zone);
        let r = apply_dead_zone(self.state.command.right, dead_zone);
        let driven = !(l.is_zero() && r.is_zero());
        match (self.state.status, driven) {
            (EngineStatus::Idle, true) => {
                self.state.status = EngineStatus::Active;
                debug!("engine active (frame {})", ctx.frame);
            }
            (EngineStatus::Active, false) => {
                self.state.status = EngineStatus::Idle;
                debug!("engine idle (frame {})", ctx.frame);
            }
            _ => {}
        }
    }

    /// Reset the pose to its defaults, rebase the telemetry origin onto it
    /// and zero the latched inputs.
    ///
    /// Applies synchronously: `&mut self` on a single thread means no step
    /// can be in flight, so the reset is atomic by construction. The state
    /// machine reports `Resetting` until the next `step`.
    pub fn request_reset(&mut self) {
        self.state.pose = NavPose::default();
        self.state.origin = self.state.pose.position;
        self.state.command = StickCommand::default();
        self.state.indicators = DirectionFlags::default();
        self.drive.reset();
        self.state.status = EngineStatus::Resetting;
        info!("pose reset, telemetry origin rebased");
    }

    // === Zoom ===

    /// Set the zoom level, clamped to [0.5, 2]. Zoom only shapes the
    /// derived field of view; it never touches the pose.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn fov(&self) -> f64 {
        BASE_FOV / self.zoom
    }

    // === Accessors ===

    pub fn pose(&self) -> &NavPose {
        &self.state.pose
    }

    pub fn origin(&self) -> Vector3<f64> {
        self.state.origin
    }

    pub fn status(&self) -> EngineStatus {
        self.state.status
    }

    pub fn indicators(&self) -> DirectionFlags {
        self.state.indicators
    }

    /// Latched command for the current frame (post-clamp, pre-dead-zone).
    pub fn command(&self) -> StickCommand {
        self.state.command
    }

    pub fn tuning(&self) -> &DriveTuning {
        &self.drive.tuning
    }
}

impl Default for NavEngine {
    fn default() -> Self {
        NavEngine::new(DriveTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> StickVector {
        StickVector::new(x, y)
    }

    fn zero() -> StickVector {
        StickVector::default()
    }

    #[test]
    fn test_initial_state() {
        let engine = NavEngine::default();
        assert_eq!(*engine.pose(), NavPose::default());
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert!((engine.zoom() - 1.0).abs() < 1e-12);
        assert!((engine.fov() - 75.0).abs() < 1e-12);
        assert!((engine.pose().position - engine.origin()).norm() < 1e-12);
    }

    #[test]
    fn test_forward_run_matches_fixed_increments() {
        let mut engine = NavEngine::default();
        for _ in 0..10 {
            engine.step(v(0.0, -1.0), zero());
        }
        assert!((engine.pose().position.z - 9.0).abs() < 1e-9);
        assert_eq!(engine.status(), EngineStatus::Active);
    }

    #[test]
    fn test_single_turn_step() {
        let mut engine = NavEngine::default();
        engine.step(zero(), v(1.0, 0.0));
        assert!((engine.pose().yaw - (-0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_dead_zoned_input_keeps_engine_idle() {
        let mut engine = NavEngine::default();
        engine.step(v(0.05, -0.05), v(0.09, 0.0));
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(*engine.pose(), NavPose::default());
    }

    #[test]
    fn test_active_falls_back_to_idle() {
        let mut engine = NavEngine::default();
        engine.step(v(0.0, -1.0), zero());
        assert_eq!(engine.status(), EngineStatus::Active);
        engine.step(zero(), zero());
        assert_eq!(engine.status(), EngineStatus::Idle);
        // No hysteresis: right back out on the next deflection
        engine.step(zero(), v(0.0, 0.5));
        assert_eq!(engine.status(), EngineStatus::Active);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let mut engine = NavEngine::default();
        engine.step(v(5.0, 0.0), zero());
        // Behaves exactly like full rim deflection (1, 0)
        assert!((engine.pose().position.x - 0.1).abs() < 1e-9);
        assert!((engine.pose().yaw - (-0.01)).abs() < 1e-12);
        assert!(engine.command().left.magnitude() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_reset_restores_defaults_and_rebases_origin() {
        let mut engine = NavEngine::default();
        for _ in 0..25 {
            engine.step(v(0.7, -0.9), v(-0.4, 0.6));
        }
        assert_ne!(*engine.pose(), NavPose::default());

        engine.request_reset();
        let pose = *engine.pose();
        assert_eq!(pose, NavPose::default());
        assert!((pose.position - engine.origin()).norm() < 1e-12);
        assert!(engine.command().left.is_zero());
        assert!(engine.command().right.is_zero());
        assert_eq!(engine.indicators(), DirectionFlags::default());
        assert_eq!(engine.status(), EngineStatus::Resetting);
    }

    #[test]
    fn test_reset_status_clears_on_next_step() {
        let mut engine = NavEngine::default();
        engine.step(v(0.0, -1.0), zero());
        engine.request_reset();
        assert_eq!(engine.status(), EngineStatus::Resetting);
        engine.step(zero(), zero());
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(*engine.pose(), NavPose::default());
    }

    #[test]
    fn test_step_after_reset_moves_from_default_pose() {
        let mut engine = NavEngine::default();
        for _ in 0..50 {
            engine.step(v(0.0, -1.0), v(1.0, 0.0));
        }
        engine.request_reset();
        // Stick still held on the frame after the reset: one clean step
        // from the default pose, passing through Idle into Active
        engine.step(v(0.0, -1.0), zero());
        assert!((engine.pose().position.z - 9.9).abs() < 1e-12);
        assert!(engine.pose().yaw.abs() < 1e-15);
        assert_eq!(engine.status(), EngineStatus::Active);
    }

    #[test]
    fn test_zoom_clamp_and_stepping() {
        let mut engine = NavEngine::default();
        engine.set_zoom(9.0);
        assert!((engine.zoom() - 2.0).abs() < 1e-12);
        engine.set_zoom(0.01);
        assert!((engine.zoom() - 0.5).abs() < 1e-12);

        engine.set_zoom(1.0);
        engine.zoom_in();
        assert!((engine.zoom() - 1.5).abs() < 1e-12);
        engine.zoom_in();
        engine.zoom_in();
        assert!((engine.zoom() - 2.0).abs() < 1e-12);

        engine.zoom_out();
        engine.zoom_out();
        engine.zoom_out();
        engine.zoom_out();
        assert!((engine.zoom() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fov_follows_zoom() {
        let mut engine = NavEngine::default();
        engine.set_zoom(2.0);
        assert!((engine.fov() - 37.5).abs() < 1e-12);
        engine.set_zoom(0.5);
        assert!((engine.fov() - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_never_touches_pose() {
        let mut engine = NavEngine::default();
        engine.step(v(0.0, -1.0), zero());
        let pose = *engine.pose();
        engine.set_zoom(2.0);
        engine.zoom_out();
        assert_eq!(*engine.pose(), pose);
    }

    #[test]
    fn test_step_tolerates_negative_pitch_limit() {
        let mut tuning = DriveTuning::default();
        tuning.pitch_limit = -1.0;
        let mut engine = NavEngine::new(tuning);
        // Must stay total with the sticks at rest and under deflection
        engine.step(zero(), zero());
        for _ in 0..80 {
            engine.step(zero(), v(0.0, -1.0));
            assert!(engine.pose().pitch.abs() <= 1.0 + 1e-12);
        }
        assert!((engine.pose().pitch - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_invariant_over_mixed_sequence() {
        let mut engine = NavEngine::default();
        let limit = engine.tuning().pitch_limit;
        let script = [
            (v(0.3, -0.8), v(0.0, -1.0)),
            (v(-1.0, 0.0), v(0.5, -1.0)),
            (zero(), v(0.0, 1.0)),
            (v(0.0, 1.0), v(-0.9, -0.9)),
        ];
        for _ in 0..40 {
            for (l, r) in script {
                engine.step(l, r);
                assert!(engine.pose().pitch.abs() <= limit + 1e-12);
            }
        }
    }
}
