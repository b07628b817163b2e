//! Command execution for the rover
//!
//! This module handles:
//! - Mapping relay command text to drive actions
//! - Executing actions on the drivetrain
//! - Suppressing repeats of the action already in progress

mod action;
mod executor;

pub use action::DriveAction;
pub use executor::DriveExecutor;

#[cfg(test)]
pub(crate) use executor::tests::{Call, RecordingDrivetrain};
