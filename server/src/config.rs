use anyhow::{bail, ensure};
use envconfig::Envconfig;
use rover_relay_shared::RelayConfig;
use std::time::Duration;

#[derive(Envconfig)]
pub struct Config {
    #[envconfig(from = "BIND_HOST", default = "0.0.0.0")]
    pub host: String,

    #[envconfig(from = "BIND_PORT", default = "3000")]
    pub port: u16,

    #[envconfig(from = "LIVENESS_TIMEOUT_SECS", default = "120")]
    pub liveness_timeout_secs: u64,

    #[envconfig(from = "SAMPLE_INTERVAL_SECS", default = "3")]
    pub sample_interval_secs: u64,

    // Off means only rover heartbeats keep the link alive
    #[envconfig(from = "ADMISSION_REFRESHES_LIVENESS", default = "true")]
    pub admission_refreshes_liveness: bool,

    #[envconfig(from = "LOG_DIR", default = "logs")]
    pub log_dir: String,
}

impl Config {
    pub fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject values the relay cannot run with. Call before using the helpers.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.sample_interval_secs > 0, "SAMPLE_INTERVAL_SECS must be non-zero");
        ensure!(self.liveness_timeout_secs > 0, "LIVENESS_TIMEOUT_SECS must be non-zero");
        if self.liveness_timeout_secs.checked_mul(1000).is_none() {
            bail!(
                "LIVENESS_TIMEOUT_SECS is too large: {}",
                self.liveness_timeout_secs
            );
        }
        Ok(())
    }

    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            timeout_ms: self.liveness_timeout_secs.saturating_mul(1000),
            admission_refreshes_liveness: self.admission_refreshes_liveness,
        }
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }
}
