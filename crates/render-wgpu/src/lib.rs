//! wgpu render backend for cube scenes.
//!
//! Draws every [`cubewalk_scene::MeshInstance`] of a frame plan from one shared
//! cube mesh, one indexed draw per selected face. Scenes with lighting use the
//! Phong pipeline; the rest are textured and unlit.
//!
//! # Invariants
//! - Renderer never mutates the scene or the camera.
//! - GPU objects are created in `new` and released on drop.

mod gpu;
mod shaders;

pub use gpu::{FaceDraw, FrameUniforms, InstanceData, WgpuRenderer, face_draws};
pub use shaders::{LIT_SHADER, ShaderSet, UNLIT_SHADER};

pub fn crate_info() -> &'static str {
    concat!("cubewalk-render-wgpu v", env!("CARGO_PKG_VERSION"))
}
