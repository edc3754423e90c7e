//! Texture and shader loading.
//!
//! Both loaders have a fallback: a missing or broken file is logged and the
//! demo keeps running with a procedural texture or the built-in shader.

mod shader;
mod texture;

pub use shader::ShaderSource;
pub use texture::{
    FALLBACK_TEXTURE_CELLS, FALLBACK_TEXTURE_SIZE, TextureImage, load_texture_or_fallback,
};

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image {0} has no pixels")]
    EmptyImage(String),
    #[error("image {path} is {width}x{height}, over the {max} texel limit")]
    TooLarge {
        path: String,
        width: u32,
        height: u32,
        max: u32,
    },
    #[error("shader {0} is empty")]
    EmptyShader(String),
}

pub fn crate_info() -> &'static str {
    concat!("cubewalk-assets v", env!("CARGO_PKG_VERSION"))
}
