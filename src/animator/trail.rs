//! The pointer-trail animator
//!
//! Owns the pointer target, both trackers and the handles of the markers
//! and hover targets it found on its surface. Hosts feed it pointer
//! notifications and call [`PointerTrail::frame`] once per display frame.

use crate::animator::error::{TrailError, TrailResult};
use crate::capture::input::types::{PointerEvent, Position};
use crate::capture::traits::{ElementId, MarkerRole, Surface};
use crate::config::TrailConfig;
use crate::processing::tracker::Tracker2D;
use std::collections::HashSet;

/// Mutable animation state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrailState {
    /// Latest pointer position; only the most recent move matters
    pub pointer: Position,
    /// Fast tracker behind the cursor dot
    pub cursor: Tracker2D,
    /// Slow tracker behind the follower ring
    pub follower: Tracker2D,
    /// Last diameter written to the follower, if any
    pub follower_size: Option<f64>,
    /// Frames rendered since attach
    pub frames: u64,
}

/// Translations written by one frame
///
/// Each is the tracker position minus the marker's half diameter, so the
/// marker's center sits on the tracked point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub cursor_translation: Position,
    pub follower_translation: Position,
}

/// Cursor dot plus follower ring animator over a [`Surface`]
///
/// Pointer and hover events only record state; marker translations are
/// written by [`frame`](Self::frame), which the host calls once per
/// display frame.
pub struct PointerTrail<S: Surface> {
    surface: S,
    config: TrailConfig,
    cursor_marker: ElementId,
    follower_marker: ElementId,
    hover_targets: HashSet<ElementId>,
    state: TrailState,
}

impl<S: Surface> PointerTrail<S> {
    /// Find both markers and the hover targets on `surface`
    ///
    /// A missing marker is reported as [`TrailError::MarkerMissing`].
    pub fn attach(mut surface: S, config: TrailConfig) -> TrailResult<Self> {
        config.validate()?;
        let (cursor_selector, follower_selector, interactive_selector) = config.selectors()?;

        let cursor_marker = surface
            .find_first(&cursor_selector)
            .ok_or(TrailError::MarkerMissing(MarkerRole::Cursor))?;
        let follower_marker = surface
            .find_first(&follower_selector)
            .ok_or(TrailError::MarkerMissing(MarkerRole::Follower))?;

        let hover_targets: HashSet<ElementId> =
            surface.find_all(&interactive_selector).into_iter().collect();

        tracing::debug!(
            "Pointer trail attached (cursor={}, follower={}, hover_targets={})",
            cursor_marker,
            follower_marker,
            hover_targets.len()
        );

        Ok(Self {
            surface,
            config,
            cursor_marker,
            follower_marker,
            hover_targets,
            state: TrailState::default(),
        })
    }

    /// Like [`attach`](Self::attach), but a missing marker disables the
    /// effect instead of failing: `Ok(None)` and nothing is written.
    pub fn install(surface: S, config: TrailConfig) -> TrailResult<Option<Self>> {
        match Self::attach(surface, config) {
            Ok(trail) => Ok(Some(trail)),
            Err(TrailError::MarkerMissing(role)) => {
                tracing::debug!("Pointer trail disabled: no {} marker", role);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Record the newest pointer position; nothing is written until the next frame
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.state.pointer = Position::new(x, y);
    }

    /// Grow the follower when the pointer enters a hover target
    ///
    /// Returns false for elements that are not hover targets. The follower
    /// is recentered for its new size once, here; later frames center it
    /// with the rest offset again.
    pub fn on_pointer_enter(&mut self, element: ElementId) -> TrailResult<bool> {
        if !self.hover_targets.contains(&element) {
            return Ok(false);
        }

        let size = self.config.follower_hover_diameter;
        self.surface.set_size(self.follower_marker, size, size)?;
        self.surface.set_translation(
            self.follower_marker,
            self.state.follower.position().centered(size / 2.0),
        )?;
        self.state.follower_size = Some(size);
        Ok(true)
    }

    /// Shrink the follower back to its rest size; no reposition
    pub fn on_pointer_leave(&mut self, element: ElementId) -> TrailResult<bool> {
        if !self.hover_targets.contains(&element) {
            return Ok(false);
        }

        let size = self.config.follower_diameter;
        self.surface.set_size(self.follower_marker, size, size)?;
        self.state.follower_size = Some(size);
        Ok(true)
    }

    /// Route a host event to the matching handler
    pub fn dispatch(&mut self, event: PointerEvent) -> TrailResult<()> {
        match event {
            PointerEvent::Move(position) => self.on_pointer_move(position.x, position.y),
            PointerEvent::Enter(element) => {
                self.on_pointer_enter(element)?;
            }
            PointerEvent::Leave(element) => {
                self.on_pointer_leave(element)?;
            }
        }
        Ok(())
    }

    /// Advance both trackers one step and write the marker translations
    pub fn frame(&mut self) -> TrailResult<FrameOutput> {
        let pointer = self.state.pointer;
        self.state.cursor.step(pointer, self.config.cursor_factor);
        self.state.follower.step(pointer, self.config.follower_factor);

        let output = FrameOutput {
            cursor_translation: self
                .state
                .cursor
                .position()
                .centered(self.config.cursor_diameter / 2.0),
            follower_translation: self
                .state
                .follower
                .position()
                .centered(self.config.follower_diameter / 2.0),
        };

        self.surface
            .set_translation(self.cursor_marker, output.cursor_translation)?;
        self.surface
            .set_translation(self.follower_marker, output.follower_translation)?;

        self.state.frames += 1;
        Ok(output)
    }

    /// Current trackers, pointer and frame count
    pub fn state(&self) -> &TrailState {
        &self.state
    }

    /// Settings the animator was attached with
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn marker(&self, role: MarkerRole) -> ElementId {
        match role {
            MarkerRole::Cursor => self.cursor_marker,
            MarkerRole::Follower => self.follower_marker,
        }
    }

    pub fn hover_targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.hover_targets.iter().copied()
    }

    pub fn is_hover_target(&self, element: ElementId) -> bool {
        self.hover_targets.contains(&element)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tear the animator down and hand the surface back
    pub fn detach(self) -> S {
        tracing::debug!("Pointer trail detached after {} frames", self.state.frames);
        self.surface
    }
}
