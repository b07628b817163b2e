//! Shared handle to the command relay

use super::clock::Clock;
use rover_relay_shared::{
    CommandRelay, Delivery, RelayConfig, RelayError, RelayEvent, StatusSnapshot,
};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

/// Serializes every relay operation behind one lock and publishes the
/// resulting events, in order, to the journal channel.
#[derive(Clone)]
pub struct RelayService {
    relay: Arc<Mutex<CommandRelay>>,
    clock: Arc<dyn Clock>,
    event_tx: mpsc::UnboundedSender<RelayEvent>,
}

impl RelayService {
    /// Create a service and the receiving end of its event stream
    pub fn new(
        config: RelayConfig,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<RelayEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let relay = CommandRelay::new(config, clock.now_ms());

        let service = Self {
            relay: Arc::new(Mutex::new(relay)),
            clock,
            event_tx,
        };
        (service, event_rx)
    }

    /// Admit a command from the control client
    pub async fn enqueue(&self, command: Option<&str>) -> Result<usize, RelayError> {
        self.with_relay(|relay, now| relay.enqueue(command, now)).await
    }

    /// Record a heartbeat from the rover
    pub async fn heartbeat(&self) {
        self.with_relay(|relay, now| relay.record_signal(now)).await
    }

    /// Next command for the rover, or the stop sentinel
    pub async fn next_command(&self) -> Delivery {
        self.with_relay(|relay, now| relay.dequeue_or_stop(now)).await
    }

    /// Evaluate liveness and report it
    pub async fn status(&self) -> StatusSnapshot {
        self.with_relay(|relay, now| relay.status_snapshot(now)).await
    }

    /// Periodic liveness sample
    pub async fn sample(&self) -> bool {
        self.with_relay(|relay, now| relay.sample(now)).await
    }

    #[cfg(test)]
    pub async fn queue_len(&self) -> usize {
        self.relay.lock().await.queue_len()
    }

    async fn with_relay<R>(&self, op: impl FnOnce(&mut CommandRelay, u64) -> R) -> R {
        let mut relay = self.relay.lock().await;
        let result = op(&mut *relay, self.clock.now_ms());

        // Published under the lock so channel order matches transition order
        for event in relay.drain_events() {
            match &event {
                RelayEvent::QueueCleared { discarded } => {
                    warn!("[LIVENESS] Rover lost, dropped {} pending commands", discarded);
                }
                RelayEvent::CommandRejected => warn!("[QUEUE] {}", event),
                RelayEvent::LivenessSampled { .. } => debug!("[LIVENESS] {}", event),
                _ => info!("[QUEUE] {}", event),
            }
            let _ = self.event_tx.send(event);
        }

        result
    }
}
