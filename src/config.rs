use anyhow::ensure;
use envconfig::Envconfig;
use std::time::Duration;

#[derive(Envconfig)]
pub struct AgentConfig {
    #[envconfig(from = "RELAY_URL", default = "http://127.0.0.1:3000")]
    pub relay_url: String,

    #[envconfig(from = "POLL_INTERVAL_MS", default = "2500")]
    pub poll_interval_ms: u64,

    #[envconfig(from = "HEARTBEAT_INTERVAL_MS", default = "30000")]
    pub heartbeat_interval_ms: u64,

    #[envconfig(from = "REQUEST_TIMEOUT_MS", default = "2000")]
    pub request_timeout_ms: u64,
}

impl AgentConfig {
    /// Reject zero durations; the loops cannot tick on a zero period.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.poll_interval_ms > 0, "POLL_INTERVAL_MS must be non-zero");
        ensure!(
            self.heartbeat_interval_ms > 0,
            "HEARTBEAT_INTERVAL_MS must be non-zero"
        );
        ensure!(self.request_timeout_ms > 0, "REQUEST_TIMEOUT_MS must be non-zero");
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
