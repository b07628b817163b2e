//! Connection to the command relay
//!
//! Polls for the next command on a fixed cadence and keeps the relay's
//! liveness timer fed with heartbeats.

mod client;
mod poller;

pub use client::RelayClient;
pub use poller::{heartbeat_loop, poll_loop};
