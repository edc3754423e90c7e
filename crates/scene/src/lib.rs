//! Scene data and the per-frame transform builder.
//!
//! A scene is a fixed table of [`MeshInstance`] records over one shared cube
//! mesh. Each frame, [`FramePlan::build`] turns the table and the camera into
//! `projection * view * model` matrices for the renderer.
//!
//! # Invariants
//! - Instance tables are immutable after authoring.
//! - Frame transforms are recomputed every frame and never cached.

mod instance;
mod lighting;
pub mod maze;
mod mesh;
mod renderer;
mod scene;
mod transform;

pub use instance::{MeshInstance, WHITE};
pub use lighting::Lighting;
pub use maze::{Cell, DEFAULT_MAZE, MazeLayout, SceneError};
pub use mesh::{CUBE_HALF_EXTENT, CubeFace, CubeMesh, FaceSet, INDICES_PER_FACE, Vertex, cube_mesh};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{CameraStart, MAZE_CELL_SIZE, MAZE_EYE_HEIGHT, MAZE_WALL_HEIGHT, Scene};
pub use transform::{FramePlan, FrameTransform, model_matrix};

pub fn crate_info() -> &'static str {
    concat!("cubewalk-scene v", env!("CARGO_PKG_VERSION"))
}
