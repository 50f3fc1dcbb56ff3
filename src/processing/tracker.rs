//! Exponential trackers for smooth marker movement
//!
//! Each frame a tracker closes a fixed fraction of the remaining distance
//! to its target. With a factor in (0, 1] it approaches the target
//! monotonically and never overshoots.

use crate::capture::input::types::Position;

/// 1D tracker state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackerState {
    pub position: f64,
}

impl TrackerState {
    /// Advance one frame toward the target
    pub fn step(&mut self, target: f64, factor: f64) {
        self.position += (target - self.position) * factor;
    }

    /// True once within `threshold` of the target
    pub fn is_settled(&self, target: f64, threshold: f64) -> bool {
        (self.position - target).abs() < threshold
    }
}

/// 2D tracker for a marker position (X and Y axes)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tracker2D {
    pub x: TrackerState,
    pub y: TrackerState,
}

impl Tracker2D {
    /// Advance both axes toward the target independently
    pub fn step(&mut self, target: Position, factor: f64) {
        self.x.step(target.x, factor);
        self.y.step(target.y, factor);
    }

    /// Current smoothed position
    pub fn position(&self) -> Position {
        Position::new(self.x.position, self.y.position)
    }

    pub fn is_settled(&self, target: Position, threshold: f64) -> bool {
        self.x.is_settled(target.x, threshold) && self.y.is_settled(target.y, threshold)
    }
}
