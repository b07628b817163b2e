//! Drivetrain abstraction
//!
//! The executor only talks to this trait; motor/servo backends plug in
//! behind it.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Wheel steering position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Left,
    Center,
    Right,
}

impl Steering {
    /// Servo angle in degrees
    pub fn angle(&self) -> u8 {
        match self {
            Steering::Left => 60,
            Steering::Center => 90,
            Steering::Right => 120,
        }
    }
}

#[async_trait]
pub trait Drivetrain: Send {
    /// Drive all motors forward
    async fn forward(&mut self) -> Result<()>;

    /// Drive all motors backward
    async fn backward(&mut self) -> Result<()>;

    /// Point all wheels
    async fn steer(&mut self, steering: Steering) -> Result<()>;

    /// Return all wheels to straight ahead
    async fn center(&mut self) -> Result<()> {
        self.steer(Steering::Center).await
    }

    /// Cut power to all motors
    async fn stop(&mut self) -> Result<()>;
}

/// Drivetrain that only logs what it would do
#[derive(Debug, Default)]
pub struct LoggingDrivetrain;

#[async_trait]
impl Drivetrain for LoggingDrivetrain {
    async fn forward(&mut self) -> Result<()> {
        info!("[DRIVE] Moving forward");
        Ok(())
    }

    async fn backward(&mut self) -> Result<()> {
        info!("[DRIVE] Moving backward");
        Ok(())
    }

    async fn steer(&mut self, steering: Steering) -> Result<()> {
        info!("[DRIVE] Steering {:?} ({} deg)", steering, steering.angle());
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        info!("[DRIVE] Motors stopped");
        Ok(())
    }
}
