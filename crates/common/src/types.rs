use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Rotation about an arbitrary axis. The axis does not need to be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: Vec3,
    pub degrees: f32,
}

impl AxisAngle {
    pub fn new(axis: Vec3, degrees: f32) -> Self {
        Self { axis, degrees }
    }

    /// Unit axis, or `None` when the axis is degenerate.
    pub fn unit_axis(&self) -> Option<Vec3> {
        self.axis.try_normalize()
    }
}

/// Fixed per-instance placement: translate, scale, optional rotation, then a
/// local offset applied after the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstanceTransform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rotation: Option<AxisAngle>,
    pub offset: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: None,
            offset: Vec3::ZERO,
        }
    }
}

impl InstanceTransform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn with_rotation(mut self, axis: Vec3, degrees: f32) -> Self {
        self.rotation = Some(AxisAngle::new(axis, degrees));
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}
