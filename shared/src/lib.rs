//! Rover Relay Shared Types
//!
//! This crate provides the command queue, consumer liveness tracking and the
//! wire types shared between the relay server and the rover agent.

pub mod liveness;
pub mod protocol;
pub mod queue;
pub mod relay;

use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub use liveness::LivenessTracker;
pub use protocol::*;
pub use queue::{CommandQueue, QueuedCommand};
pub use relay::{CommandRelay, Delivery, Evaluation, RelayConfig, RelayEvent, StatusSnapshot};

/// Reserved instruction meaning "halt all motion".
///
/// Consumers in the field match on this exact string.
pub const FULL_STOP: &str = "FULL_STOP";

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Timing parameters for the relay
pub mod timing {
    /// Consumer is considered disconnected after this long without a signal
    pub const LIVENESS_TIMEOUT_MS: u64 = 120_000;

    /// Interval of the background liveness sampler
    pub const SAMPLE_INTERVAL_MS: u64 = 3_000;

    /// How often the rover polls for its next command
    pub const POLL_INTERVAL_MS: u64 = 2_500;

    /// How often the rover asserts it is still operating
    pub const HEARTBEAT_INTERVAL_MS: u64 = 30_000;
}

/// Errors surfaced by relay operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Command is required")]
    InvalidCommand,
}
