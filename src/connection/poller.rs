//! Poll and heartbeat loops

use super::client::{CommandSource, RelayClient};
use crate::command::{DriveAction, DriveExecutor};
use crate::drivetrain::Drivetrain;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Fetch one command and act on it.
///
/// A failed fetch is treated as `FULL_STOP`: the rover must not keep
/// running its last instruction while the relay is unreachable.
pub async fn poll_once<S, D>(source: &S, executor: &mut DriveExecutor<D>) -> DriveAction
where
    S: CommandSource + ?Sized,
    D: Drivetrain,
{
    let action = match source.next_command().await {
        Ok(next) => {
            debug!(
                "Received command: {} (queue={} connected={})",
                next.command, next.queue_length, next.camera_connected
            );
            DriveAction::from(next.command.as_str())
        }
        Err(e) => {
            warn!("Failed to get command, using FULL_STOP: {}", e);
            DriveAction::FullStop
        }
    };

    if let Err(e) = executor.execute(action).await {
        error!("Failed to execute {}: {}", action, e);
    }
    action
}

/// Poll for commands until cancelled
pub async fn poll_loop<S, D>(
    source: &S,
    executor: &mut DriveExecutor<D>,
    poll_interval: Duration,
    cancel: CancellationToken,
) where
    S: CommandSource + ?Sized,
    D: Drivetrain,
{
    let mut ticker = interval(poll_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                poll_once(source, executor).await;
            }
        }
    }
}

/// Send heartbeats until cancelled
pub async fn heartbeat_loop(
    client: RelayClient,
    heartbeat_interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = interval(heartbeat_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = client.heartbeat().await {
                    warn!("Heartbeat failed: {}", e);
                }
            }
        }
    }
}
