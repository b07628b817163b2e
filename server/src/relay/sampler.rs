//! Background liveness sampling

use super::service::RelayService;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically evaluates rover liveness until cancelled
pub struct LivenessSampler {
    service: RelayService,
    sample_interval: Duration,
}

impl LivenessSampler {
    pub fn new(service: RelayService, sample_interval: Duration) -> Self {
        Self {
            service,
            sample_interval,
        }
    }

    /// Run the sampling loop; returns once `cancel` fires
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = interval(self.sample_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("[LIVENESS] Sampler stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let alive = self.service.sample().await;
                    debug!("[LIVENESS] Sampled: alive={}", alive);
                }
            }
        }
    }
}
