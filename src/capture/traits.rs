//! Display surface abstraction
//!
//! The animator never touches a concrete display. It finds its markers and
//! hover targets through a [`Surface`] and writes translations and sizes
//! back to it.

use crate::animator::error::TrailResult;
use crate::capture::input::types::Position;
use crate::capture::selector::Selector;
use serde::{Deserialize, Serialize};

/// Opaque handle to an element owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two visual markers the animator drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    /// Small dot tracking the pointer closely
    Cursor,
    /// Larger ring trailing behind
    Follower,
}

impl std::fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerRole::Cursor => write!(f, "cursor"),
            MarkerRole::Follower => write!(f, "cursor-follower"),
        }
    }
}

/// A display the animator can query and write to
pub trait Surface {
    /// First element matching `selector`, if any
    fn find_first(&mut self, selector: &Selector) -> Option<ElementId>;

    /// Every element matching `selector`, in document order
    fn find_all(&mut self, selector: &Selector) -> Vec<ElementId>;

    /// Set the 2D translation of an element, in px
    fn set_translation(&mut self, element: ElementId, translation: Position) -> TrailResult<()>;

    /// Set the explicit width and height of an element, in px
    fn set_size(&mut self, element: ElementId, width: f64, height: f64) -> TrailResult<()>;
}
