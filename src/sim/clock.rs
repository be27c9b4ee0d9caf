//! Pausable timeline clock
//!
//! Tracks simulated elapsed milliseconds for the driver loop. Timestamps
//! are caller-supplied, so the driver feeds wall time while tests feed
//! scripted values. While paused, `elapsed` is frozen at the pause point;
//! the paused span is subtracted from every later reading, so game time
//! never includes time spent behind a dialog.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineClock {
    /// Timestamp the clock was started or last restarted at
    started_at: f64,
    /// Timestamp of the active pause, if any
    paused_at: Option<f64>,
    /// Total milliseconds spent paused since the last restart
    paused_total: f64,
}

impl TimelineClock {
    /// Start a clock at the given timestamp
    pub fn new(now: f64) -> Self {
        Self {
            started_at: now,
            paused_at: None,
            paused_total: 0.0,
        }
    }

    /// Elapsed unpaused milliseconds since start
    pub fn elapsed(&self, now: f64) -> f64 {
        let reference = self.paused_at.unwrap_or(now);
        reference - self.started_at - self.paused_total
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze the clock. Pausing an already-paused clock keeps the
    /// original pause point.
    pub fn pause(&mut self, now: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Unfreeze the clock, folding the pause span into the subtracted
    /// total. A no-op when not paused.
    pub fn resume(&mut self, now: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now - paused_at;
        }
    }

    /// Re-arm the clock at a new origin, dropping any pause state
    pub fn restart(&mut self, now: f64) {
        *self = Self::new(now);
    }
}
