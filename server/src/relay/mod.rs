//! Relay state ownership for the server
//!
//! This module handles:
//! - Serializing queue and liveness operations behind one lock
//! - Publishing relay events to the journal
//! - Periodic liveness sampling with cooperative shutdown

mod clock;
mod sampler;
mod service;

#[cfg(test)]
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use sampler::LivenessSampler;
pub use service::RelayService;
