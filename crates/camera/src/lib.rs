//! First-person camera for the cubewalk demos.
//!
//! The camera is driven by mouse and keyboard through [`CameraController`],
//! which consumes one [`cubewalk_input::FrameInput`] per frame.
//!
//! # Invariants
//! - Pitch stays strictly within (-89, 89) degrees.
//! - Field of view stays within [1, 45] degrees.
//! - Displacement is `speed * dt`, independent of frame rate.

mod camera;
mod controller;

pub use camera::{
    CameraState, FAR_PLANE, MAX_FOV_DEGREES, MIN_FOV_DEGREES, MoveDirection, MovementMode,
    NEAR_PLANE, PITCH_LIMIT_DEGREES,
};
pub use controller::CameraController;

pub fn crate_info() -> &'static str {
    concat!("cubewalk-camera v", env!("CARGO_PKG_VERSION"))
}
