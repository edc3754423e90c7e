//! Shared value types and the demo configuration file.

pub mod config;
mod types;

pub use config::{ConfigError, DemoConfig};
pub use types::{AxisAngle, InstanceTransform};
