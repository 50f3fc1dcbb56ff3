//! Offline trail replay
//!
//! Resamples recorded pointer moves at a fixed frame rate and feeds them
//! to a [`PointerTrail`] on a headless surface, producing one sample per
//! frame. Handy for previews and for checking a configuration without a
//! display.

use crate::animator::error::{TrailError, TrailResult};
use crate::animator::trail::PointerTrail;
use crate::capture::headless::HeadlessSurface;
use crate::capture::input::types::{PointerMove, Position};
use crate::capture::selector::{CURSOR_SELECTOR, FOLLOWER_SELECTOR};
use crate::config::TrailConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on frames a single replay may produce
pub const MAX_REPLAY_FRAMES: usize = 1_000_000;

/// Trail state after one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailSample {
    /// Fast tracker position
    pub cursor: Position,
    /// Slow tracker position
    pub follower: Position,
    /// Translation written to the cursor marker
    pub cursor_translation: Position,
    /// Translation written to the follower marker
    pub follower_translation: Position,
    /// Pointer position the trackers were chasing
    pub raw: Position,
    /// Time in milliseconds from the first frame
    pub process_time_ms: f64,
}

/// Replay recorded moves through the animator
///
/// Frames run at `t = 0, 1/fps, ...` up to the last move's time. Before
/// each frame every move at or before the frame time is delivered, so only
/// the latest one counts. Fails if the recording would need more than
/// [`MAX_REPLAY_FRAMES`] frames or ends on a bad timestamp.
pub fn replay_trail(moves: &[PointerMove], config: &TrailConfig) -> TrailResult<Vec<TrailSample>> {
    config.validate()?;

    if moves.is_empty() {
        return Ok(vec![]);
    }

    let frame_duration_ms = 1000.0 / config.frame_rate;
    let total_duration_ms = moves.last().map(|m| m.process_time_ms).unwrap_or(0.0);
    let frame_count = frame_count(total_duration_ms, frame_duration_ms)?;

    // The recording says nothing about markers; use the stock ones
    let replay_config = TrailConfig {
        cursor_selector: CURSOR_SELECTOR.to_string(),
        follower_selector: FOLLOWER_SELECTOR.to_string(),
        ..config.clone()
    };
    let mut trail = PointerTrail::attach(HeadlessSurface::with_markers(), replay_config)?;

    let mut result = Vec::with_capacity(frame_count);
    let mut next_move = 0;

    for frame in 0..frame_count {
        let frame_time_ms = frame as f64 * frame_duration_ms;

        while next_move < moves.len() && moves[next_move].process_time_ms <= frame_time_ms {
            let pointer = &moves[next_move];
            trail.on_pointer_move(pointer.x, pointer.y);
            next_move += 1;
        }
        // Nothing recorded yet at t=0: chase the first move
        if next_move == 0 {
            trail.on_pointer_move(moves[0].x, moves[0].y);
        }

        let output = trail.frame()?;
        let state = trail.state();

        result.push(TrailSample {
            cursor: state.cursor.position(),
            follower: state.follower.position(),
            cursor_translation: output.cursor_translation,
            follower_translation: output.follower_translation,
            raw: state.pointer,
            process_time_ms: frame_time_ms,
        });
    }

    Ok(result)
}

fn frame_count(total_duration_ms: f64, frame_duration_ms: f64) -> TrailResult<usize> {
    if !total_duration_ms.is_finite() || total_duration_ms < 0.0 {
        return Err(TrailError::Replay(format!(
            "last move has an invalid timestamp: {}ms",
            total_duration_ms
        )));
    }

    let intervals = (total_duration_ms / frame_duration_ms).floor();
    if intervals >= MAX_REPLAY_FRAMES as f64 {
        return Err(TrailError::Replay(format!(
            "{}ms at {:.3}ms per frame exceeds the {} frame limit",
            total_duration_ms, frame_duration_ms, MAX_REPLAY_FRAMES
        )));
    }

    Ok(intervals as usize + 1)
}

/// Read moves from a JSON file, replay them and write the samples as JSON
pub fn replay_trail_file(
    input: &Path,
    output: &Path,
    config: &TrailConfig,
) -> TrailResult<usize> {
    let content = std::fs::read_to_string(input)?;
    let moves: Vec<PointerMove> = serde_json::from_str(&content)?;

    tracing::info!(
        "Replaying {} pointer moves at {}fps (factors: cursor={}, follower={})",
        moves.len(),
        config.frame_rate,
        config.cursor_factor,
        config.follower_factor
    );

    let samples = replay_trail(&moves, config)?;
    let data = serde_json::to_vec_pretty(&samples)?;
    std::fs::write(output, data)?;

    tracing::info!("Wrote {} trail samples to {}", samples.len(), output.display());

    Ok(samples.len())
}
