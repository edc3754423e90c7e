use crate::AssetError;
use std::path::Path;

/// Edge length of the procedural fallback texture.
pub const FALLBACK_TEXTURE_SIZE: u32 = 256;
pub const FALLBACK_TEXTURE_CELLS: u32 = 8;

/// Decoded RGBA8 texture, rows ordered bottom to top.
///
/// Images store their top row first while uv (0,0) is the bottom-left of a
/// face, so decoding flips the rows once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decode a PNG or JPEG file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let decoded = image::load_from_memory(&bytes)?;
        let rgba = decoded.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage(path.display().to_string()));
        }
        tracing::info!("loaded texture {} ({width}x{height})", path.display());
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Two-tone checkerboard with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        const LIGHT: [u8; 4] = [230, 230, 230, 255];
        const DARK: [u8; 4] = [90, 60, 140, 255];
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let texel = if (x / cell + y / cell) % 2 == 0 {
                    LIGHT
                } else {
                    DARK
                };
                rgba.extend_from_slice(&texel);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    /// RGBA of the texel at `(x, y)`, with `y = 0` the bottom row.
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba.get(i..i + 4).and_then(|s| s.try_into().ok())
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// Whether both edges are within a GPU's `max_dimension`.
    pub fn fits(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }

    /// Like [`TextureImage::load`], rejecting images wider or taller than
    /// `max_dimension`.
    pub fn load_within(path: impl AsRef<Path>, max_dimension: u32) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let texture = Self::load(path)?;
        if !texture.fits(max_dimension) {
            return Err(AssetError::TooLarge {
                path: path.display().to_string(),
                width: texture.width,
                height: texture.height,
                max: max_dimension,
            });
        }
        Ok(texture)
    }

    fn fallback() -> Self {
        Self::checkerboard(FALLBACK_TEXTURE_SIZE, FALLBACK_TEXTURE_CELLS)
    }
}

/// Load `path`, or fall back to the checkerboard when it is missing,
/// unreadable, or larger than `max_dimension` on either edge. `None` selects
/// the checkerboard without a warning.
pub fn load_texture_or_fallback(path: Option<&Path>, max_dimension: u32) -> TextureImage {
    let Some(path) = path else {
        tracing::debug!("no texture configured, using checkerboard");
        return TextureImage::fallback();
    };
    match TextureImage::load_within(path, max_dimension) {
        Ok(texture) => texture,
        Err(e) => {
            tracing::warn!(
                "failed to load texture {}: {e}; using checkerboard",
                path.display()
            );
            TextureImage::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_two_row_png(path: &Path) {
        // Top row red, bottom row blue.
        let img = image::RgbaImage::from_fn(3, 2, |_, y| {
            if y == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        img.save(path).unwrap();
    }

    #[test]
    fn load_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.png");
        write_two_row_png(&path);

        let tex = TextureImage::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(tex.rgba.len(), 3 * 2 * 4);
        assert_eq!(tex.texel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(tex.texel(2, 1), Some([255, 0, 0, 255]));
        assert_eq!(tex.bytes_per_row(), 12);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextureImage::load(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = TextureImage::load(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureImage::checkerboard(4, 2);
        assert_eq!(tex.rgba.len(), 4 * 4 * 4);
        assert_ne!(tex.texel(0, 0), tex.texel(2, 0));
        assert_eq!(tex.texel(0, 0), tex.texel(1, 1));
        assert_eq!(tex.texel(0, 0), tex.texel(2, 2));
        assert_eq!(tex.texel(4, 0), None);
    }

    #[test]
    fn fallback_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");
        let tex = load_texture_or_fallback(Some(&missing), 8192);
        assert_eq!(tex, TextureImage::checkerboard(256, 8));
        assert_eq!(load_texture_or_fallback(None, 8192), tex);
    }

    #[test]
    fn fallback_not_used_when_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.png");
        write_two_row_png(&path);
        let tex = load_texture_or_fallback(Some(&path), 8192);
        assert_eq!(tex.width, 3);
    }

    #[test]
    fn size_check_against_device_limit() {
        let tex = TextureImage::checkerboard(4, 2);
        assert!(tex.fits(4));
        assert!(tex.fits(8192));
        assert!(!tex.fits(3));
        let wide = TextureImage {
            width: 10_000,
            height: 2,
            rgba: vec![0; 10_000 * 2 * 4],
        };
        assert!(!wide.fits(8192));
    }

    #[test]
    fn oversized_image_is_rejected_and_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_two_row_png(&path);

        let err = TextureImage::load_within(&path, 2).unwrap_err();
        assert!(matches!(
            err,
            AssetError::TooLarge {
                width: 3,
                height: 2,
                max: 2,
                ..
            }
        ));
        let tex = load_texture_or_fallback(Some(&path), 2);
        assert_eq!(tex, TextureImage::checkerboard(256, 8));
    }
}
