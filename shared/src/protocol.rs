//! JSON wire types for the relay HTTP interface
//!
//! Field names and literal strings are fixed by deployed rovers and control
//! clients, so everything is camelCase and the messages are verbatim.

use crate::relay::{Delivery, StatusSnapshot};
use serde::{Deserialize, Serialize};

/// Body of `POST /command`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: Option<String>,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
        }
    }
}

/// Response to a successful `POST /command`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandAccepted {
    pub status: String,
    pub message: String,
    pub queue_length: usize,
}

impl CommandAccepted {
    pub fn new(queue_length: usize) -> Self {
        Self {
            status: "success".into(),
            message: "Command added to queue".into(),
            queue_length,
        }
    }
}

/// Generic `{status, message}` reply, used for errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: message.into(),
        }
    }
}

/// Response to `POST /heartbeat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatAck {
    pub status: String,
}

impl Default for HeartbeatAck {
    fn default() -> Self {
        Self {
            status: "success".into(),
        }
    }
}

/// Response to `GET /next-command`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextCommand {
    pub command: String,
    pub queue_length: usize,
    pub camera_connected: bool,
}

impl From<Delivery> for NextCommand {
    fn from(delivery: Delivery) -> Self {
        Self {
            command: delivery.command,
            queue_length: delivery.queue_len,
            camera_connected: delivery.alive,
        }
    }
}

/// Response to `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl From<StatusSnapshot> for StatusResponse {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            status: "Server Running".into(),
            message: snapshot.summary,
        }
    }
}
