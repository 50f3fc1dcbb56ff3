//! Processing module for marker motion
//!
//! This module contains the exponential trackers driving the markers and
//! the offline replay of recorded pointer moves through them.

pub mod trail_replay;
pub mod tracker;

pub use trail_replay::{replay_trail, replay_trail_file, TrailSample, MAX_REPLAY_FRAMES};
pub use tracker::{Tracker2D, TrackerState};
