//! Command Relay
//!
//! Owns the pending queue and the liveness tracker together, so that
//! "consumer detected dead" and "queue cleared" happen as one step.
//! Every state transition is recorded as a [`RelayEvent`] in an outbox the
//! owner drains after each call; the relay itself performs no I/O.

use crate::liveness::LivenessTracker;
use crate::queue::{CommandQueue, QueuedCommand};
use crate::{timing, RelayError, FULL_STOP};
use std::fmt;

/// Tunables for a [`CommandRelay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Consumer is considered gone after this long without a signal
    pub timeout_ms: u64,
    /// Whether a successful admission also counts as a consumer signal
    pub admission_refreshes_liveness: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            timeout_ms: timing::LIVENESS_TIMEOUT_MS,
            admission_refreshes_liveness: true,
        }
    }
}

/// Observable state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// A command was admitted to the tail of the queue. `submitted` is the
    /// text as the client sent it, `command` the normalized form.
    CommandAccepted {
        command: String,
        submitted: String,
        queue_len: usize,
    },
    /// An admission was refused (missing or empty text)
    CommandRejected,
    /// The head command was handed to the rover
    CommandDelivered { command: String, queue_len: usize },
    /// The queue was empty and the rover was told to stop
    StopIssued,
    /// The rover sent a heartbeat
    HeartbeatReceived,
    /// Liveness was lost with work pending; the backlog was dropped
    QueueCleared { discarded: usize },
    /// Periodic liveness sample
    LivenessSampled { alive: bool },
}

impl fmt::Display for RelayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayEvent::CommandAccepted { submitted, .. } => {
                write!(f, "Command added: {}", submitted)
            }
            RelayEvent::CommandRejected => write!(f, "Error: NO COMMAND"),
            RelayEvent::CommandDelivered { command, .. } => {
                write!(f, "Sending command to rover: {}", command)
            }
            RelayEvent::StopIssued => write!(f, "No commands in queue, STOPPING ROVER"),
            RelayEvent::HeartbeatReceived => write!(f, "Camera HB received"),
            RelayEvent::QueueCleared { discarded } => write!(
                f,
                "Lost Camera Connection. CLEARING COMMAND QUEUE OF: {} commands",
                discarded
            ),
            RelayEvent::LivenessSampled { alive: true } => write!(f, "Camera Status: Connected"),
            RelayEvent::LivenessSampled { alive: false } => {
                write!(f, "Camera Status: Disconnected")
            }
        }
    }
}

/// Outcome of a liveness evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub alive: bool,
    /// Number of commands dropped, if a clear happened
    pub discarded: Option<usize>,
}

/// What the rover receives when it polls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub command: String,
    pub queue_len: usize,
    pub alive: bool,
}

impl Delivery {
    /// Whether this is the stop sentinel rather than a queued command
    pub fn is_stop(&self) -> bool {
        self.command == FULL_STOP
    }
}

/// Point-in-time view for status queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub alive: bool,
    pub queue_len: usize,
    pub last_signal_age_ms: u64,
    pub summary: String,
}

/// Single owner of the queue and liveness state
#[derive(Debug)]
pub struct CommandRelay {
    config: RelayConfig,
    queue: CommandQueue,
    liveness: LivenessTracker,
    events: Vec<RelayEvent>,
}

impl CommandRelay {
    /// Create a relay; the start time counts as the first signal
    pub fn new(config: RelayConfig, started_at_ms: u64) -> Self {
        Self {
            config,
            queue: CommandQueue::new(),
            liveness: LivenessTracker::new(started_at_ms, config.timeout_ms),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> RelayConfig {
        self.config
    }

    /// Admit a command, returning the new queue length
    pub fn enqueue(&mut self, raw: Option<&str>, now_ms: u64) -> Result<usize, RelayError> {
        let command = match QueuedCommand::new(raw, now_ms) {
            Ok(command) => command,
            Err(e) => {
                self.events.push(RelayEvent::CommandRejected);
                return Err(e);
            }
        };

        let text = command.text.clone();
        let submitted = raw.unwrap_or_default().to_string();
        let queue_len = self.queue.push(command);

        self.liveness.record_admission(now_ms);
        if self.config.admission_refreshes_liveness {
            self.liveness.record_signal(now_ms);
        }

        self.events.push(RelayEvent::CommandAccepted {
            command: text,
            submitted,
            queue_len,
        });
        Ok(queue_len)
    }

    /// Record a heartbeat from the rover
    pub fn record_signal(&mut self, now_ms: u64) {
        self.liveness.record_signal(now_ms);
        self.events.push(RelayEvent::HeartbeatReceived);
    }

    /// Pure liveness query
    pub fn is_alive(&self, now_ms: u64) -> bool {
        self.liveness.is_alive(now_ms)
    }

    /// Drop the backlog if the consumer is gone and work is pending
    pub fn reconcile(&mut self, now_ms: u64) -> Option<usize> {
        if self.liveness.is_alive(now_ms) || self.queue.is_empty() {
            return None;
        }

        let discarded = self.queue.clear();
        self.events.push(RelayEvent::QueueCleared { discarded });
        Some(discarded)
    }

    /// Liveness check followed by reconcile
    ///
    /// Asking whether the rover is alive can destroy pending work.
    pub fn evaluate(&mut self, now_ms: u64) -> Evaluation {
        let alive = self.is_alive(now_ms);
        let discarded = self.reconcile(now_ms);
        Evaluation { alive, discarded }
    }

    /// Hand out the head command, or the stop sentinel if nothing is pending
    pub fn dequeue_or_stop(&mut self, now_ms: u64) -> Delivery {
        let Evaluation { alive, .. } = self.evaluate(now_ms);

        match self.queue.pop() {
            Some(command) => {
                let queue_len = self.queue.len();
                self.events.push(RelayEvent::CommandDelivered {
                    command: command.text.clone(),
                    queue_len,
                });
                Delivery {
                    command: command.text,
                    queue_len,
                    alive,
                }
            }
            None => {
                self.events.push(RelayEvent::StopIssued);
                Delivery {
                    command: FULL_STOP.to_string(),
                    queue_len: 0,
                    alive,
                }
            }
        }
    }

    /// Evaluate liveness and describe the current state
    pub fn status_snapshot(&mut self, now_ms: u64) -> StatusSnapshot {
        let Evaluation { alive, .. } = self.evaluate(now_ms);
        StatusSnapshot {
            alive,
            queue_len: self.queue.len(),
            last_signal_age_ms: self.liveness.elapsed_ms(now_ms),
            summary: format!("CAMERA CONNECTED: {}", alive),
        }
    }

    /// Background sample: evaluate and record the result
    pub fn sample(&mut self, now_ms: u64) -> bool {
        let Evaluation { alive, .. } = self.evaluate(now_ms);
        self.events.push(RelayEvent::LivenessSampled { alive });
        alive
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn liveness(&self) -> &LivenessTracker {
        &self.liveness
    }

    /// Take all events recorded since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<RelayEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_000_000;
    const TIMEOUT: u64 = timing::LIVENESS_TIMEOUT_MS;

    fn relay() -> CommandRelay {
        CommandRelay::new(RelayConfig::default(), T0)
    }

    #[test]
    fn test_enqueue_then_dequeue_upper_cases() {
        let mut relay = relay();
        assert_eq!(relay.enqueue(Some("move forward"), T0), Ok(1));

        let delivery = relay.dequeue_or_stop(T0 + 10);
        assert_eq!(delivery.command, "MOVE FORWARD");
        assert_eq!(delivery.queue_len, 0);
        assert!(delivery.alive);
        assert!(!delivery.is_stop());
    }

    #[test]
    fn test_invalid_enqueue_has_no_effect() {
        let mut relay = relay();
        relay.enqueue(Some("a"), T0).unwrap();
        relay.drain_events();

        assert_eq!(relay.enqueue(Some(""), T0 + 1), Err(RelayError::InvalidCommand));
        assert_eq!(relay.enqueue(None, T0 + 1), Err(RelayError::InvalidCommand));
        assert_eq!(relay.queue_len(), 1);
        assert_eq!(relay.liveness().last_admission_ms(), Some(T0));
        assert_eq!(
            relay.drain_events(),
            vec![RelayEvent::CommandRejected, RelayEvent::CommandRejected]
        );
    }

    #[test]
    fn test_empty_queue_yields_stop_repeatedly() {
        let mut relay = relay();
        for i in 0..3 {
            let delivery = relay.dequeue_or_stop(T0 + i);
            assert_eq!(delivery.command, FULL_STOP);
            assert_eq!(delivery.queue_len, 0);
            assert!(delivery.is_stop());
        }
        assert_eq!(relay.queue_len(), 0);
    }

    #[test]
    fn test_fifo_delivery() {
        let mut relay = relay();
        for c in ["A", "B", "C"] {
            relay.enqueue(Some(c), T0).unwrap();
        }

        let order: Vec<_> = (0..3).map(|_| relay.dequeue_or_stop(T0).command).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(relay.dequeue_or_stop(T0).command, FULL_STOP);
    }

    #[test]
    fn test_silence_clears_pending_work() {
        let mut relay = relay();
        relay.enqueue(Some("left"), T0).unwrap();
        relay.enqueue(Some("right"), T0).unwrap();
        relay.drain_events();

        let evaluation = relay.evaluate(T0 + TIMEOUT);
        assert_eq!(
            evaluation,
            Evaluation {
                alive: false,
                discarded: Some(2)
            }
        );
        assert_eq!(relay.queue_len(), 0);
        assert_eq!(
            relay.drain_events(),
            vec![RelayEvent::QueueCleared { discarded: 2 }]
        );
    }

    #[test]
    fn test_dequeue_after_timeout_issues_stop() {
        let mut relay = relay();
        relay.enqueue(Some("forward"), T0).unwrap();
        relay.drain_events();

        let delivery = relay.dequeue_or_stop(T0 + TIMEOUT + 5);
        assert!(delivery.is_stop());
        assert!(!delivery.alive);
        assert_eq!(
            relay.drain_events(),
            vec![
                RelayEvent::QueueCleared { discarded: 1 },
                RelayEvent::StopIssued
            ]
        );
    }

    #[test]
    fn test_dead_with_empty_queue_does_not_clear() {
        let mut relay = relay();
        let evaluation = relay.evaluate(T0 + TIMEOUT);
        assert!(!evaluation.alive);
        assert_eq!(evaluation.discarded, None);
        assert!(relay.drain_events().is_empty());
    }

    #[test]
    fn test_is_alive_is_pure() {
        let mut relay = relay();
        relay.enqueue(Some("x"), T0).unwrap();

        assert!(!relay.is_alive(T0 + TIMEOUT));
        assert_eq!(relay.queue_len(), 1);
    }

    #[test]
    fn test_liveness_boundary_and_recovery() {
        let mut relay = relay();
        assert!(relay.is_alive(T0 + TIMEOUT - 1));
        assert!(!relay.is_alive(T0 + TIMEOUT));

        relay.record_signal(T0 + TIMEOUT);
        assert!(relay.is_alive(T0 + TIMEOUT));
    }

    #[test]
    fn test_admission_refreshes_liveness_by_default() {
        let mut relay = relay();
        relay.enqueue(Some("x"), T0 + TIMEOUT - 1).unwrap();
        assert!(relay.is_alive(T0 + TIMEOUT + 10));
    }

    #[test]
    fn test_admission_can_be_decoupled_from_liveness() {
        let config = RelayConfig {
            admission_refreshes_liveness: false,
            ..Default::default()
        };
        let mut relay = CommandRelay::new(config, T0);
        relay.enqueue(Some("x"), T0 + TIMEOUT - 1).unwrap();

        assert!(!relay.is_alive(T0 + TIMEOUT));
        assert_eq!(relay.reconcile(T0 + TIMEOUT), Some(1));
    }

    #[test]
    fn test_heartbeat_scenario() {
        let mut relay = relay();
        relay.enqueue(Some("move forward"), T0).unwrap();
        relay.record_signal(T0 + 1);
        assert!(relay.is_alive(T0 + 1));

        let first = relay.dequeue_or_stop(T0 + 2);
        assert_eq!(first.command, "MOVE FORWARD");
        assert_eq!(first.queue_len, 0);
        assert!(first.alive);

        let second = relay.dequeue_or_stop(T0 + 3);
        assert_eq!(second.command, FULL_STOP);
        assert_eq!(second.queue_len, 0);

        assert_eq!(
            relay.drain_events(),
            vec![
                RelayEvent::CommandAccepted {
                    command: "MOVE FORWARD".into(),
                    submitted: "move forward".into(),
                    queue_len: 1
                },
                RelayEvent::HeartbeatReceived,
                RelayEvent::CommandDelivered {
                    command: "MOVE FORWARD".into(),
                    queue_len: 0
                },
                RelayEvent::StopIssued,
            ]
        );
    }

    #[test]
    fn test_status_snapshot() {
        let mut relay = relay();
        relay.enqueue(Some("x"), T0).unwrap();

        let status = relay.status_snapshot(T0 + 500);
        assert!(status.alive);
        assert_eq!(status.queue_len, 1);
        assert_eq!(status.last_signal_age_ms, 500);
        assert_eq!(status.summary, "CAMERA CONNECTED: true");

        let status = relay.status_snapshot(T0 + TIMEOUT);
        assert!(!status.alive);
        assert_eq!(status.queue_len, 0);
        assert_eq!(status.summary, "CAMERA CONNECTED: false");
    }

    #[test]
    fn test_sample_records_liveness() {
        let mut relay = relay();
        assert!(relay.sample(T0));
        assert!(!relay.sample(T0 + TIMEOUT));
        assert_eq!(
            relay.drain_events(),
            vec![
                RelayEvent::LivenessSampled { alive: true },
                RelayEvent::LivenessSampled { alive: false },
            ]
        );
    }

    #[test]
    fn test_accepted_line_keeps_submitted_text() {
        let mut relay = relay();
        relay.enqueue(Some("move forward"), T0).unwrap();

        let events = relay.drain_events();
        assert_eq!(events[0].to_string(), "Command added: move forward");
        assert_eq!(relay.dequeue_or_stop(T0).command, "MOVE FORWARD");
    }

    #[test]
    fn test_event_journal_lines() {
        assert_eq!(
            RelayEvent::QueueCleared { discarded: 3 }.to_string(),
            "Lost Camera Connection. CLEARING COMMAND QUEUE OF: 3 commands"
        );
        assert_eq!(
            RelayEvent::CommandDelivered {
                command: "FORWARD".into(),
                queue_len: 0
            }
            .to_string(),
            "Sending command to rover: FORWARD"
        );
        assert_eq!(
            RelayEvent::LivenessSampled { alive: false }.to_string(),
            "Camera Status: Disconnected"
        );
    }
}
