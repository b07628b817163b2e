//! Mapping from relay command text to drive actions

use rover_relay_shared::FULL_STOP;

/// Motion the rover knows how to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveAction {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    FullStop,
}

impl DriveAction {
    /// Wire name of this action
    pub fn as_str(&self) -> &'static str {
        match self {
            DriveAction::Forward => "FORWARD",
            DriveAction::Backward => "BACKWARD",
            DriveAction::TurnLeft => "TURN_LEFT",
            DriveAction::TurnRight => "TURN_RIGHT",
            DriveAction::FullStop => FULL_STOP,
        }
    }
}

impl From<&str> for DriveAction {
    /// Anything unrecognised halts the rover
    fn from(text: &str) -> Self {
        match text.trim() {
            "FORWARD" => DriveAction::Forward,
            "BACKWARD" => DriveAction::Backward,
            "TURN_LEFT" => DriveAction::TurnLeft,
            "TURN_RIGHT" => DriveAction::TurnRight,
            _ => DriveAction::FullStop,
        }
    }
}

impl std::fmt::Display for DriveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
