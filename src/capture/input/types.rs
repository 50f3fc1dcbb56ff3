use crate::capture::traits::ElementId;
use serde::{Deserialize, Serialize};

/// A point in client-area pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift both axes by `-offset`, used to center a marker on this point
    pub fn centered(self, offset: f64) -> Self {
        Self::new(self.x - offset, self.y - offset)
    }

    pub fn distance_to(self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A recorded pointer move, as read from replay input
///
/// `processTimeMs` is milliseconds since the recording started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerMove {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub process_time_ms: f64,
}

impl PointerMove {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Notifications the host delivers to the animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(Position),
    Enter(ElementId),
    Leave(ElementId),
}
