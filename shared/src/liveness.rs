//! Consumer liveness tracking
//!
//! Liveness is derived purely from elapsed time since the last signal; the
//! tracker never looks at the clock itself.

use crate::timing;

/// Tracks when the rover (or, with coupling enabled, the operator) was last heard from
#[derive(Debug, Clone)]
pub struct LivenessTracker {
    timeout_ms: u64,
    last_signal_ms: u64,
    last_admission_ms: Option<u64>,
}

impl LivenessTracker {
    /// Create a tracker that counts `started_at_ms` as the first signal
    pub fn new(started_at_ms: u64, timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            last_signal_ms: started_at_ms,
            last_admission_ms: None,
        }
    }

    /// Create a tracker with the default 120 second timeout
    pub fn with_default_timeout(started_at_ms: u64) -> Self {
        Self::new(started_at_ms, timing::LIVENESS_TIMEOUT_MS)
    }

    /// Record a consumer signal
    pub fn record_signal(&mut self, now_ms: u64) {
        self.last_signal_ms = now_ms;
    }

    /// Record producer activity (a command admission)
    pub fn record_admission(&mut self, now_ms: u64) {
        self.last_admission_ms = Some(now_ms);
    }

    /// Alive while strictly less than the timeout has elapsed
    pub fn is_alive(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) < self.timeout_ms
    }

    /// Milliseconds since the last consumer signal
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_signal_ms)
    }

    pub fn last_signal_ms(&self) -> u64 {
        self.last_signal_ms
    }

    pub fn last_admission_ms(&self) -> Option<u64> {
        self.last_admission_ms
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
