//! Fixed sensor viewpoint.
//!
//! Toggles the camera between free orbiting and a pose locked behind
//! the origin looking down the coverage axis. Entering saves the exact
//! camera and controller state; leaving restores it bit for bit. The
//! transition is instantaneous, with no interpolation.

use crate::config::ViewConfig;
use crate::ground::horizontal_direction;
use crate::scene::{Camera, OrbitController};
use glam::Vec3;

/// Camera ownership state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Camera under orbit-controller control
    Free,
    /// Camera locked to the computed coverage-axis pose
    Fixed,
}

/// Everything needed to restore the free-orbit state exactly.
#[derive(Debug, Clone, Copy)]
struct SavedPose {
    camera_position: Vec3,
    camera_target: Vec3,
    controller_target: Vec3,
    enabled: bool,
    pan_enabled: bool,
    min_distance: f32,
    max_distance: f32,
}

/// Two-state camera lock.
#[derive(Debug)]
pub struct FixedViewpoint {
    mode: ViewMode,
    saved: Option<SavedPose>,
    config: ViewConfig,
}

impl FixedViewpoint {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            mode: ViewMode::Free,
            saved: None,
            config,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_fixed(&self) -> bool {
        self.mode == ViewMode::Fixed
    }

    /// Locks the camera behind the origin along the coverage axis.
    ///
    /// Saves the current pose and controller bounds first, then places
    /// the eye `eye_back_m` behind the origin at `eye_height_m` and
    /// aims `target_ahead_m` ahead. Zoom bounds are relaxed so the new
    /// distance is not clamped away; panning is disabled while fixed.
    pub fn enter(
        &mut self,
        camera: &mut Camera,
        controller: &mut OrbitController,
        coverage_dir: Vec3,
    ) {
        if self.mode == ViewMode::Fixed {
            return;
        }

        self.saved = Some(SavedPose {
            camera_position: camera.position,
            camera_target: camera.target,
            controller_target: controller.target,
            enabled: controller.enabled,
            pan_enabled: controller.pan_enabled,
            min_distance: controller.min_distance,
            max_distance: controller.max_distance,
        });

        let forward = horizontal_direction(coverage_dir);
        let eye = -forward * self.config.eye_back_m + Vec3::Y * self.config.eye_height_m;
        let target = forward * self.config.target_ahead_m;
        let distance = (eye - target).length();

        camera.position = eye;
        camera.target = target;
        controller.target = target;
        controller.min_distance = controller.min_distance.min(distance);
        controller.max_distance = controller.max_distance.max(distance);
        controller.pan_enabled = false;

        self.mode = ViewMode::Fixed;
        log::debug!("FixedViewpoint: entered fixed pose at {eye}");
    }

    /// Restores the saved free-orbit pose exactly.
    pub fn exit(&mut self, camera: &mut Camera, controller: &mut OrbitController) {
        if self.mode == ViewMode::Free {
            return;
        }
        if let Some(saved) = self.saved.take() {
            camera.position = saved.camera_position;
            camera.target = saved.camera_target;
            controller.target = saved.controller_target;
            controller.enabled = saved.enabled;
            controller.pan_enabled = saved.pan_enabled;
            controller.min_distance = saved.min_distance;
            controller.max_distance = saved.max_distance;
        }
        self.mode = ViewMode::Free;
        log::debug!("FixedViewpoint: returned to free orbit");
    }

    /// Flips between the two states.
    pub fn toggle(
        &mut self,
        camera: &mut Camera,
        controller: &mut OrbitController,
        coverage_dir: Vec3,
    ) {
        match self.mode {
            ViewMode::Free => self.enter(camera, controller, coverage_dir),
            ViewMode::Fixed => self.exit(camera, controller),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Camera, OrbitController, FixedViewpoint) {
        (
            Camera::default(),
            OrbitController::default(),
            FixedViewpoint::new(ViewConfig::default()),
        )
    }

    #[test]
    fn test_enter_places_eye_behind_origin() {
        let (mut camera, mut controller, mut view) = setup();
        view.enter(&mut camera, &mut controller, Vec3::X);
        assert!(view.is_fixed());
        // Eye behind the origin (west), elevated; target ahead (east).
        assert!(camera.position.x < 0.0);
        assert!(camera.position.y > 0.0);
        assert!(camera.target.x > 0.0);
        assert!(!controller.pan_enabled);
    }

    #[test]
    fn test_exit_restores_exact_state() {
        let (mut camera, mut controller, mut view) = setup();
        let camera_before = camera;
        let controller_before = controller;

        view.enter(&mut camera, &mut controller, Vec3::X);
        view.exit(&mut camera, &mut controller);

        assert_eq!(camera, camera_before);
        assert_eq!(controller, controller_before);
        assert_eq!(view.mode(), ViewMode::Free);
    }

    #[test]
    fn test_toggle_flips_state() {
        let (mut camera, mut controller, mut view) = setup();
        view.toggle(&mut camera, &mut controller, Vec3::Z);
        assert!(view.is_fixed());
        view.toggle(&mut camera, &mut controller, Vec3::Z);
        assert!(!view.is_fixed());
    }

    #[test]
    fn test_enter_twice_keeps_first_saved_pose() {
        let (mut camera, mut controller, mut view) = setup();
        let original = camera;
        view.enter(&mut camera, &mut controller, Vec3::Z);
        // Second enter is a no-op; the original pose must survive.
        view.enter(&mut camera, &mut controller, Vec3::X);
        view.exit(&mut camera, &mut controller);
        assert_eq!(camera, original);
    }

    #[test]
    fn test_exit_restores_controller_enabled_flag() {
        let (mut camera, mut controller, mut view) = setup();
        view.enter(&mut camera, &mut controller, Vec3::Z);
        // Host toggled the controller off while fixed; exit restores
        // the flag saved on entry.
        controller.enabled = false;
        view.exit(&mut camera, &mut controller);
        assert!(controller.enabled);
    }

    #[test]
    fn test_zoom_bounds_admit_fixed_distance() {
        let (mut camera, mut controller, mut view) = setup();
        controller.max_distance = 10.0; // would clamp the fixed pose away
        view.enter(&mut camera, &mut controller, Vec3::Z);
        let distance = (camera.position - camera.target).length();
        assert!(controller.max_distance >= distance);
        assert!(controller.min_distance <= distance);
    }
}
