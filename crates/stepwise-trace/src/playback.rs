//! Playback controller.
//!
//! Holds one fully materialized trace and a cursor into it. The controller is
//! a plain state machine: auto-play is modelled as a state plus a `tick()`
//! operation, and the timer that calls `tick()` lives in [`crate::driver`].

use std::time::Duration;

use crate::types::{Step, Trace};

/// Errors raised by the playback controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("no trace loaded")]
    NoTraceLoaded,

    #[error("auto-play interval must be greater than zero")]
    InvalidInterval,
}

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No trace loaded.
    Idle,
    /// Trace loaded, cursor at the first step, never moved.
    Ready,
    /// Cursor moved manually.
    Scrubbing,
    /// Cursor advanced by a timer at a fixed interval.
    AutoPlaying { interval: Duration },
}

/// Cursor over a loaded trace.
#[derive(Debug)]
pub struct Playback<E, S> {
    trace: Option<Trace<E, S>>,
    cursor: usize,
    state: PlaybackState,
}

impl<E, S> Default for Playback<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> Playback<E, S> {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self {
            trace: None,
            cursor: 0,
            state: PlaybackState::Idle,
        }
    }

    /// Create a controller with a trace already loaded.
    pub fn with_trace(trace: Trace<E, S>) -> Self {
        let mut playback = Self::new();
        playback.load(trace);
        playback
    }

    /// Load a trace, replacing any previous one. Stops auto-play.
    pub fn load(&mut self, trace: Trace<E, S>) {
        tracing::debug!(name = %trace.name, steps = trace.len(), "trace loaded");
        self.trace = Some(trace);
        self.cursor = 0;
        self.state = PlaybackState::Ready;
    }

    /// Clear the trace and return to idle.
    pub fn reset(&mut self) {
        self.trace = None;
        self.cursor = 0;
        self.state = PlaybackState::Idle;
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::AutoPlaying { .. })
    }

    /// The loaded trace, if any.
    pub fn trace(&self) -> Option<&Trace<E, S>> {
        self.trace.as_ref()
    }

    /// Current 0-based cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the loaded trace (0 when idle).
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 >= self.len()
    }

    /// 1-based position and total, for "step k of n" displays.
    pub fn progress(&self) -> Result<(usize, usize), PlaybackError> {
        let trace = self.loaded()?;
        Ok((self.cursor + 1, trace.len()))
    }

    /// The step at the cursor.
    pub fn current(&self) -> Result<&Step<E, S>, PlaybackError> {
        let trace = self.loaded()?;
        trace.get(self.cursor).ok_or(PlaybackError::NoTraceLoaded)
    }

    /// Move one step forward. Returns whether the cursor moved.
    pub fn advance(&mut self) -> Result<bool, PlaybackError> {
        let len = self.loaded()?.len();
        if self.cursor + 1 >= len {
            return Ok(false);
        }
        self.cursor += 1;
        self.mark_manual_move();
        Ok(true)
    }

    /// Move one step back. Returns whether the cursor moved.
    pub fn retreat(&mut self) -> Result<bool, PlaybackError> {
        self.loaded()?;
        if self.cursor == 0 {
            return Ok(false);
        }
        self.cursor -= 1;
        self.mark_manual_move();
        Ok(true)
    }

    /// Jump to a 0-based index, clamped to the trace bounds.
    pub fn seek(&mut self, index: usize) -> Result<bool, PlaybackError> {
        let len = self.loaded()?.len();
        let target = index.min(len.saturating_sub(1));
        if target == self.cursor {
            return Ok(false);
        }
        self.cursor = target;
        self.mark_manual_move();
        Ok(true)
    }

    /// Start auto-play. Idempotent while already playing; a no-op at the end.
    /// A zero interval is rejected.
    pub fn play(&mut self, interval: Duration) -> Result<PlaybackState, PlaybackError> {
        self.loaded()?;
        if interval.is_zero() {
            return Err(PlaybackError::InvalidInterval);
        }
        if !self.is_playing() && !self.is_at_end() {
            tracing::debug!(interval_ms = interval.as_millis() as u64, "auto-play started");
            self.state = PlaybackState::AutoPlaying { interval };
        }
        Ok(self.state)
    }

    /// Stop auto-play. Further ticks have no effect.
    pub fn stop(&mut self) {
        if self.is_playing() {
            tracing::debug!(cursor = self.cursor, "auto-play stopped");
            self.state = PlaybackState::Scrubbing;
        }
    }

    /// One timer tick: advance exactly one step while auto-playing.
    ///
    /// Auto-play stops itself once the last step is reached.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let moved = if self.is_at_end() {
            false
        } else {
            self.cursor += 1;
            true
        };
        if self.is_at_end() {
            self.stop();
        }
        moved
    }

    fn loaded(&self) -> Result<&Trace<E, S>, PlaybackError> {
        self.trace.as_ref().ok_or(PlaybackError::NoTraceLoaded)
    }

    fn mark_manual_move(&mut self) {
        if !self.is_playing() {
            self.state = PlaybackState::Scrubbing;
        }
    }
}
