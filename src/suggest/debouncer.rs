//! Debounce timer for suggestion refreshes
//!
//! Edits to the row set arrive in bursts while the user types. The
//! debouncer delays the refresh decision until input has been quiet for
//! the configured window (default 1000ms), so rapid edits collapse into
//! a single evaluation against the most recent row set.

use std::time::{Duration, Instant};

/// Default quiescence window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Tracks when the last row edit occurred and whether an evaluation is
/// waiting for the window to close. Rescheduling restarts the window,
/// so a burst of edits yields one evaluation after the final edit.
#[derive(Debug)]
pub struct Debouncer {
    /// Debounce delay in milliseconds
    delay_ms: u64,
    /// Timestamp of the last input that triggered a debounce
    last_input_time: Option<Instant>,
    /// Whether there's a pending evaluation waiting for the window to expire
    pending: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_input_time: None,
            pending: false,
        }
    }

    /// Schedule an evaluation after the debounce delay. Repeated calls
    /// restart the window.
    pub fn schedule(&mut self) {
        self.schedule_at(Instant::now());
    }

    fn schedule_at(&mut self, now: Instant) {
        self.last_input_time = Some(now);
        self.pending = true;
    }

    /// True once a scheduled evaluation has waited out the window.
    pub fn is_ready(&self) -> bool {
        self.is_ready_at(Instant::now())
    }

    fn is_ready_at(&self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }
        match self.last_input_time {
            Some(last) => now.duration_since(last) >= Duration::from_millis(self.delay_ms),
            None => false,
        }
    }

    /// Mark the pending evaluation as handled.
    pub fn mark_complete(&mut self) {
        self.pending = false;
        self.last_input_time = None;
    }

    /// Check if an evaluation is waiting for the window to close.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Get the configured delay in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
