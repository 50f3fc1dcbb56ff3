//! Pointer input types
//!
//! Pointer moves and hover notifications as delivered by the host, plus
//! the recorded move format consumed by trail replay.

pub mod types;

pub use types::{PointerEvent, PointerMove, Position};
