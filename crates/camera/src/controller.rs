use crate::camera::{CameraState, MoveDirection};
use cubewalk_input::{Action, FrameInput};

const MOVEMENT: [(Action, MoveDirection); 6] = [
    (Action::MoveForward, MoveDirection::Forward),
    (Action::MoveBackward, MoveDirection::Backward),
    (Action::StrafeLeft, MoveDirection::Left),
    (Action::StrafeRight, MoveDirection::Right),
    (Action::Ascend, MoveDirection::Up),
    (Action::Descend, MoveDirection::Down),
];

/// Applies one frame of input to a [`CameraState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    pub sprint_multiplier: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            sprint_multiplier: 3.0,
        }
    }
}

impl CameraController {
    pub fn new(sprint_multiplier: f32) -> Self {
        Self { sprint_multiplier }
    }

    /// Look, then zoom, then move by `dt` seconds.
    pub fn apply(&self, camera: &mut CameraState, input: &FrameInput, dt: f32) {
        if input.look != glam::Vec2::ZERO {
            camera.look(input.look.x, input.look.y);
        }
        if input.scroll != 0.0 {
            camera.zoom(input.scroll);
            tracing::trace!("fov -> {:.1}", camera.fov());
        }

        let dt = if input.is_held(Action::Sprint) {
            dt * self.sprint_multiplier
        } else {
            dt
        };
        for (action, direction) in MOVEMENT {
            if input.is_held(action) {
                camera.translate(direction, dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    const EPS: f32 = 1e-5;

    fn held(actions: &[Action]) -> FrameInput {
        FrameInput::default().with_held(actions.iter().copied())
    }

    #[test]
    fn idle_input_changes_nothing() {
        let mut cam = CameraState::default();
        let before = cam.clone();
        CameraController::default().apply(&mut cam, &FrameInput::default(), 0.5);
        assert_eq!(cam, before);
    }

    #[test]
    fn forward_then_back_returns_home() {
        let controller = CameraController::default();
        let mut cam = CameraState::default();
        controller.apply(&mut cam, &held(&[Action::MoveForward]), 0.2);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, 2.5), EPS));
        controller.apply(&mut cam, &held(&[Action::MoveBackward]), 0.2);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), EPS));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut cam = CameraState::default();
        let start = cam.position;
        CameraController::default().apply(
            &mut cam,
            &held(&[Action::StrafeLeft, Action::StrafeRight]),
            1.0,
        );
        assert!(cam.position.abs_diff_eq(start, EPS));
    }

    #[test]
    fn sprint_multiplies_displacement() {
        let controller = CameraController::new(3.0);
        let mut walk = CameraState::default();
        let mut run = CameraState::default();
        let start = walk.position;
        controller.apply(&mut walk, &held(&[Action::MoveForward]), 0.1);
        controller.apply(&mut run, &held(&[Action::MoveForward, Action::Sprint]), 0.1);
        let dw = (walk.position - start).length();
        let dr = (run.position - start).length();
        assert!((dr - 3.0 * dw).abs() < EPS);
    }

    #[test]
    fn displacement_scales_with_frame_time() {
        let controller = CameraController::default();
        let input = held(&[Action::MoveForward, Action::StrafeRight]);
        let mut distances = Vec::new();
        for dt in [0.01, 0.02, 0.04] {
            let mut cam = CameraState::default();
            let start = cam.position;
            controller.apply(&mut cam, &input, dt);
            distances.push((cam.position - start).length());
        }
        assert!((distances[1] - 2.0 * distances[0]).abs() < EPS);
        assert!((distances[2] - 4.0 * distances[0]).abs() < EPS);
    }

    #[test]
    fn look_and_scroll_are_applied() {
        let mut cam = CameraState::default();
        let input = FrameInput {
            look: Vec2::new(0.0, 100.0),
            scroll: 5.0,
            ..FrameInput::default()
        };
        CameraController::default().apply(&mut cam, &input, 0.016);
        assert!((cam.pitch() - 10.0).abs() < EPS);
        assert!((cam.fov() - 40.0).abs() < EPS);
    }

    #[test]
    fn long_input_sequences_respect_clamps() {
        let controller = CameraController::default();
        let mut cam = CameraState::default();
        for i in 0..500 {
            let sign = if i % 7 < 4 { 1.0 } else { -1.0 };
            let input = FrameInput {
                look: Vec2::new(sign * 37.0, sign * 91.0 * (i % 5) as f32),
                scroll: sign * (i % 3) as f32 * 4.0,
                ..FrameInput::default()
            };
            controller.apply(&mut cam, &input, 0.016);
            assert!(cam.pitch().abs() < 89.0);
            assert!((1.0..=45.0).contains(&cam.fov()));
        }
    }
}
