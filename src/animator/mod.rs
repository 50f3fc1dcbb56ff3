//! The pointer-trail animator
//!
//! Defines the animator component, its error type and the native frame
//! loop that drives it.

pub mod error;
pub mod trail;

#[cfg(not(target_arch = "wasm32"))]
pub mod frame_loop;

pub use error::{TrailError, TrailResult};
pub use trail::{FrameOutput, PointerTrail, TrailState};

#[cfg(not(target_arch = "wasm32"))]
pub use frame_loop::{FrameLoop, SharedTrail};
