use bytemuck::{Pod, Zeroable};
use std::ops::Range;

/// Half the edge length of the authored cube.
pub const CUBE_HALF_EXTENT: f32 = 1.0;

pub const INDICES_PER_FACE: u32 = 6;

/// GPU vertex layout shared by every cube instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Normalized RGBA.
    pub color: [u8; 4],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// Cube faces, in vertex-buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// +Z
    Front = 0,
    /// -Z
    Back = 1,
    /// +X
    Right = 2,
    /// -X
    Left = 3,
    /// +Y
    Top = 4,
    /// -Y
    Bottom = 5,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    pub fn normal(self) -> [f32; 3] {
        match self {
            CubeFace::Front => [0.0, 0.0, 1.0],
            CubeFace::Back => [0.0, 0.0, -1.0],
            CubeFace::Right => [1.0, 0.0, 0.0],
            CubeFace::Left => [-1.0, 0.0, 0.0],
            CubeFace::Top => [0.0, 1.0, 0.0],
            CubeFace::Bottom => [0.0, -1.0, 0.0],
        }
    }

    /// Slice of the cube index buffer that draws this face.
    pub fn index_range(self) -> Range<u32> {
        let start = self as u32 * INDICES_PER_FACE;
        start..start + INDICES_PER_FACE
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Subset of cube faces an instance draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: FaceSet = FaceSet(0);
    pub const ALL: FaceSet = FaceSet(0b11_1111);
    /// Front, back, right and left.
    pub const SIDES: FaceSet = FaceSet(0b00_1111);

    pub fn only(face: CubeFace) -> Self {
        FaceSet(face.bit())
    }

    pub fn with(self, face: CubeFace) -> Self {
        FaceSet(self.0 | face.bit())
    }

    pub fn contains(self, face: CubeFace) -> bool {
        self.0 & face.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Faces in vertex-buffer order.
    pub fn iter(self) -> impl Iterator<Item = CubeFace> {
        CubeFace::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl Default for FaceSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Vertex and index data for the textured cube.
#[derive(Debug, Clone)]
pub struct CubeMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl CubeMesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Unit cube spanning ±[`CUBE_HALF_EXTENT`], four vertices per face,
/// counter-clockwise seen from outside. Each face maps the full texture with
/// uv (0,0) at its bottom-left corner.
pub fn cube_mesh() -> CubeMesh {
    let p = CUBE_HALF_EXTENT;
    #[rustfmt::skip]
    let corners: [[[f32; 3]; 4]; 6] = [
        // Front (+Z)
        [[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]],
        // Back (-Z)
        [[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]],
        // Right (+X)
        [[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]],
        // Left (-X)
        [[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]],
        // Top (+Y)
        [[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]],
        // Bottom (-Y)
        [[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]],
    ];
    const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (face, quad) in CubeFace::ALL.into_iter().zip(corners) {
        let base = vertices.len() as u16;
        for (position, uv) in quad.into_iter().zip(UVS) {
            vertices.push(Vertex {
                position,
                color: [255, 255, 255, 255],
                uv,
                normal: face.normal(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    CubeMesh { vertices, indices }
}
