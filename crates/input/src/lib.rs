//! Desktop input mapped to camera actions.
//!
//! # Invariants
//! - The camera consumes one [`FrameInput`] per frame, never raw events.
//! - The first cursor sample after startup or focus loss yields no motion.

pub mod action;
mod state;

pub use action::{Action, InputError, KeyBindings};
pub use state::{CursorLatch, FrameInput, InputState};

pub fn crate_info() -> &'static str {
    concat!("cubewalk-input v", env!("CARGO_PKG_VERSION"))
}
