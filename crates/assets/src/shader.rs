use crate::AssetError;
use std::borrow::Cow;
use std::path::Path;

/// WGSL source text, either read from disk or compiled into the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub label: String,
    pub code: Cow<'static, str>,
    pub from_file: bool,
}

impl ShaderSource {
    pub fn embedded(label: impl Into<String>, code: &'static str) -> Self {
        Self {
            label: label.into(),
            code: Cow::Borrowed(code),
            from_file: false,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path)?;
        if code.trim().is_empty() {
            return Err(AssetError::EmptyShader(path.display().to_string()));
        }
        Ok(Self {
            label: path.display().to_string(),
            code: Cow::Owned(code),
            from_file: true,
        })
    }

    /// Read `dir/file_name` if a directory is given, otherwise (or on any
    /// read error) use `embedded`.
    pub fn load_or_embedded(dir: Option<&Path>, file_name: &str, embedded: &'static str) -> Self {
        let Some(dir) = dir else {
            return Self::embedded(file_name, embedded);
        };
        let path = dir.join(file_name);
        match Self::load(&path) {
            Ok(source) => {
                tracing::info!("using shader override {}", path.display());
                source
            }
            Err(e) => {
                tracing::warn!(
                    "failed to read shader {}: {e}; using built-in source",
                    path.display()
                );
                Self::embedded(file_name, embedded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILTIN: &str = "@vertex fn vs_main() {}";

    #[test]
    fn no_dir_uses_embedded() {
        let src = ShaderSource::load_or_embedded(None, "lit.wgsl", BUILTIN);
        assert!(!src.from_file);
        assert_eq!(src.code, BUILTIN);
        assert_eq!(src.label, "lit.wgsl");
    }

    #[test]
    fn override_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lit.wgsl"), "// custom").unwrap();
        let src = ShaderSource::load_or_embedded(Some(dir.path()), "lit.wgsl", BUILTIN);
        assert!(src.from_file);
        assert_eq!(src.code, "// custom");
    }

    #[test]
    fn missing_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let src = ShaderSource::load_or_embedded(Some(dir.path()), "unlit.wgsl", BUILTIN);
        assert!(!src.from_file);
        assert_eq!(src.code, BUILTIN);
    }

    #[test]
    fn empty_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unlit.wgsl");
        std::fs::write(&path, "  \n").unwrap();
        assert!(matches!(
            ShaderSource::load(&path),
            Err(AssetError::EmptyShader(_))
        ));
        let src = ShaderSource::load_or_embedded(Some(dir.path()), "unlit.wgsl", BUILTIN);
        assert!(!src.from_file);
    }
}
