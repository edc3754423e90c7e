//! Demo configuration file.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides. Command-line flags take precedence over file values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Errors from loading or saving a [`DemoConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Degrees of yaw/pitch per pixel of cursor motion.
    pub mouse_sensitivity: f32,
    /// Camera speed in world units per second.
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    /// Texture applied to every cube face. `None` uses the procedural checkerboard.
    pub texture_path: Option<PathBuf>,
    /// Directory with `unlit.wgsl` / `lit.wgsl` overrides.
    pub shader_dir: Option<PathBuf>,
    /// Key name (e.g. `"KeyW"`) to action name (e.g. `"move_forward"`).
    pub key_bindings: BTreeMap<String, String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 800,
            mouse_sensitivity: 0.1,
            move_speed: 2.5,
            sprint_multiplier: 3.0,
            texture_path: None,
            shader_dir: None,
            key_bindings: BTreeMap::new(),
        }
    }
}

impl DemoConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid {
                field: "window_width/window_height",
                reason: "window dimensions must be non-zero".into(),
            });
        }
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            return Err(ConfigError::Invalid {
                field: "mouse_sensitivity",
                reason: format!("expected a positive number, got {}", self.mouse_sensitivity),
            });
        }
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            return Err(ConfigError::Invalid {
                field: "move_speed",
                reason: format!("expected a positive number, got {}", self.move_speed),
            });
        }
        if !(self.sprint_multiplier.is_finite() && self.sprint_multiplier >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "sprint_multiplier",
                reason: format!("expected a number >= 1, got {}", self.sprint_multiplier),
            });
        }
        Ok(())
    }

    /// Width over height of the configured window.
    pub fn aspect(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
