use glam::{Mat4, Vec3};

/// Pitch stays strictly inside `±PITCH_LIMIT_DEGREES`.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;
/// Largest pitch magnitude actually held, one step below the limit.
const PITCH_CLAMP_DEGREES: f32 = PITCH_LIMIT_DEGREES - 1e-3;
pub const MIN_FOV_DEGREES: f32 = 1.0;
pub const MAX_FOV_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

const WORLD_UP: Vec3 = Vec3::Y;

/// How held movement keys translate the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Move along the full look direction; ascend/descend along world up.
    #[default]
    Fly,
    /// Move on the XZ plane only; eye height never changes.
    Walk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// First-person camera. Angles are in degrees.
///
/// `front`, `right` and `up` are derived from yaw and pitch and only change
/// through [`CameraState::look`] or [`CameraState::set_orientation`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    /// World units per second.
    pub speed: f32,
    /// Degrees per pixel of look delta.
    pub sensitivity: f32,
    pub mode: MovementMode,
}

impl Default for CameraState {
    fn default() -> Self {
        // yaw 0 looks down +X, so -90 starts the camera looking down -Z.
        Self::new(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0)
    }
}

impl CameraState {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov: MAX_FOV_DEGREES,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            speed: 2.5,
            sensitivity: 0.1,
            mode: MovementMode::Fly,
        };
        camera.set_orientation(yaw, pitch);
        camera
    }

    pub fn with_mode(mut self, mode: MovementMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Set yaw and pitch directly. Pitch is clamped into the open range
    /// `(-89, 89)`.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_CLAMP_DEGREES, PITCH_CLAMP_DEGREES);
        self.update_basis();
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }

    /// Apply a look delta in pixels (`+dy` looks up).
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.set_orientation(
            self.yaw + dx * self.sensitivity,
            self.pitch + dy * self.sensitivity,
        );
    }

    /// Scrolling away from the user narrows the field of view.
    pub fn zoom(&mut self, scroll: f32) {
        self.set_fov(self.fov - scroll);
    }

    /// Move `speed * dt` world units in `direction`.
    pub fn translate(&mut self, direction: MoveDirection, dt: f32) {
        let step = self.speed * dt;
        let forward = match self.mode {
            MovementMode::Fly => self.front,
            MovementMode::Walk => Vec3::new(self.front.x, 0.0, self.front.z).normalize_or_zero(),
        };
        let delta = match direction {
            MoveDirection::Forward => forward * step,
            MoveDirection::Backward => -forward * step,
            MoveDirection::Left => -self.right * step,
            MoveDirection::Right => self.right * step,
            MoveDirection::Up if self.mode == MovementMode::Fly => WORLD_UP * step,
            MoveDirection::Down if self.mode == MovementMode::Fly => -WORLD_UP * step,
            MoveDirection::Up | MoveDirection::Down => Vec3::ZERO,
        };
        self.position += delta;
    }

    pub fn target(&self) -> Vec3 {
        self.position + self.front
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), WORLD_UP)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = CameraState::default();
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.fov(), 45.0);
        assert!(cam.front().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut cam = CameraState::default();
        cam.look(237.0, -120.0);
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS);
        assert!((r.length() - 1.0).abs() < EPS);
        assert!((u.length() - 1.0).abs() < EPS);
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    #[test]
    fn look_scales_by_sensitivity() {
        let mut cam = CameraState::default();
        cam.look(100.0, 50.0);
        assert!((cam.yaw() - -80.0).abs() < EPS);
        assert!((cam.pitch() - 5.0).abs() < EPS);
        assert!(cam.front().y > 0.0);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut cam = CameraState::default();
        for dy in [5000.0, -20000.0, 3.0, 1e9, -1e9, 0.5] {
            cam.look(13.0, dy);
            assert!(cam.pitch() < PITCH_LIMIT_DEGREES);
            assert!(cam.pitch() > -PITCH_LIMIT_DEGREES);
            assert!(cam.front().is_finite());
        }
    }

    #[test]
    fn pitch_never_reaches_the_limit() {
        let mut cam = CameraState::default();
        cam.look(0.0, 10_000.0);
        assert!(cam.pitch() < 89.0);
        assert!(cam.pitch() > 88.99);
        cam.set_orientation(0.0, -89.0);
        assert!(cam.pitch() > -89.0);
        assert!(cam.up().y > 0.0);
    }

    #[test]
    fn fov_stays_clamped() {
        let mut cam = CameraState::default();
        for scroll in [1.0, 100.0, -3.0, -500.0, 44.5, 0.25] {
            cam.zoom(scroll);
            assert!(cam.fov() >= MIN_FOV_DEGREES);
            assert!(cam.fov() <= MAX_FOV_DEGREES);
        }
        cam.zoom(-1000.0);
        assert_eq!(cam.fov(), MAX_FOV_DEGREES);
        cam.zoom(1000.0);
        assert_eq!(cam.fov(), MIN_FOV_DEGREES);
    }

    #[test]
    fn movement_is_linear_in_dt() {
        let mut a = CameraState::default();
        let mut b = CameraState::default();
        let start = a.position;
        a.translate(MoveDirection::Forward, 0.016);
        b.translate(MoveDirection::Forward, 0.032);
        let da = (a.position - start).length();
        let db = (b.position - start).length();
        assert!((da - 2.5 * 0.016).abs() < EPS);
        assert!((db - 2.0 * da).abs() < EPS);
    }

    #[test]
    fn strafing_moves_along_right() {
        let mut cam = CameraState::default();
        cam.translate(MoveDirection::Right, 1.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(2.5, 0.0, 3.0), EPS));
        cam.translate(MoveDirection::Left, 2.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(-2.5, 0.0, 3.0), EPS));
    }

    #[test]
    fn walk_mode_keeps_eye_height() {
        let mut cam = CameraState::new(Vec3::new(0.0, 1.0, 0.0), -90.0, 0.0)
            .with_mode(MovementMode::Walk);
        cam.look(0.0, 450.0);
        assert!(cam.front().y > 0.5);
        cam.translate(MoveDirection::Forward, 1.0);
        cam.translate(MoveDirection::Up, 1.0);
        assert!((cam.position.y - 1.0).abs() < EPS);
        // Full speed on the ground plane even while looking up.
        assert!((cam.position.z - -2.5).abs() < 1e-4);
    }

    #[test]
    fn fly_mode_ascends() {
        let mut cam = CameraState::default();
        cam.translate(MoveDirection::Up, 2.0);
        assert!((cam.position.y - 5.0).abs() < EPS);
    }

    #[test]
    fn view_projection_is_finite() {
        let cam = CameraState::default();
        let vp = cam.view_projection(16.0 / 9.0);
        assert!(vp.is_finite());
    }
}
