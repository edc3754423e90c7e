use crate::mesh::FaceSet;
use cubewalk_common::InstanceTransform;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One placed copy of the cube mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInstance {
    pub name: String,
    pub transform: InstanceTransform,
    pub faces: FaceSet,
    /// Multiplied with the texture and vertex color.
    pub tint: [f32; 4],
}

impl MeshInstance {
    pub fn new(name: impl Into<String>, transform: InstanceTransform) -> Self {
        Self {
            name: name.into(),
            transform,
            faces: FaceSet::ALL,
            tint: WHITE,
        }
    }

    pub fn with_faces(mut self, faces: FaceSet) -> Self {
        self.faces = faces;
        self
    }

    pub fn with_tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = tint;
        self
    }
}
