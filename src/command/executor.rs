//! Drive executor - turns relay commands into drivetrain calls

use super::action::DriveAction;
use crate::drivetrain::{Drivetrain, Steering};
use anyhow::Result;
use tracing::{debug, info};

/// Executes drive actions, skipping repeats of the last one performed
pub struct DriveExecutor<D: Drivetrain> {
    drivetrain: D,
    last_action: DriveAction,
}

impl<D: Drivetrain> DriveExecutor<D> {
    /// The rover starts out stopped
    pub fn new(drivetrain: D) -> Self {
        Self {
            drivetrain,
            last_action: DriveAction::FullStop,
        }
    }

    #[cfg(test)]
    pub fn last_action(&self) -> DriveAction {
        self.last_action
    }

    #[cfg(test)]
    pub fn drivetrain(&self) -> &D {
        &self.drivetrain
    }

    /// Execute `action` unless it repeats the last one.
    ///
    /// Returns whether the drivetrain was actuated. On error the last action
    /// is left unchanged so the next poll retries.
    pub async fn execute(&mut self, action: DriveAction) -> Result<bool> {
        if action == self.last_action {
            debug!("Already executing {}", action);
            return Ok(false);
        }

        info!("Executing {} (was {})", action, self.last_action);
        self.perform(action).await?;
        self.last_action = action;
        Ok(true)
    }

    /// Stop unconditionally, used on shutdown
    pub async fn halt(&mut self) -> Result<()> {
        self.perform(DriveAction::FullStop).await?;
        self.last_action = DriveAction::FullStop;
        Ok(())
    }

    async fn perform(&mut self, action: DriveAction) -> Result<()> {
        let d = &mut self.drivetrain;
        match action {
            DriveAction::TurnLeft => {
                d.steer(Steering::Left).await?;
                d.forward().await?;
                d.center().await
            }
            DriveAction::TurnRight => {
                d.steer(Steering::Right).await?;
                d.forward().await?;
                d.center().await
            }
            DriveAction::Forward => d.forward().await,
            DriveAction::Backward => d.backward().await,
            DriveAction::FullStop => {
                d.center().await?;
                d.stop().await
            }
        }
    }
}
