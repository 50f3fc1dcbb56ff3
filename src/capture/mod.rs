//! Display surfaces and pointer input
//!
//! This module provides the surface abstraction the animator draws on, the
//! selectors used to find markers and hover targets, and the concrete
//! surfaces: in-memory everywhere, DOM on wasm32.

pub mod headless;
pub mod input;
pub mod selector;
pub mod style;
pub mod traits;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export traits
pub use traits::{ElementId, MarkerRole, Surface};

pub use headless::HeadlessSurface;
pub use selector::{Selector, SelectorError};

#[cfg(target_arch = "wasm32")]
pub use web::{DomSurface, WebPointerTrail};
