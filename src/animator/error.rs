use crate::capture::selector::SelectorError;
use crate::capture::traits::{ElementId, MarkerRole};
use thiserror::Error;

/// Errors that can occur while setting up or driving the trail
#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Marker not found: {0}")]
    MarkerMissing(MarkerRole),

    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Selector error: {0}")]
    Selector(#[from] SelectorError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Replay error: {0}")]
    Replay(String),

    #[error("Frame loop error: {0}")]
    FrameLoop(String),
}

/// Result type for trail operations
pub type TrailResult<T> = Result<T, TrailError>;
