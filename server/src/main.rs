mod config;
mod handlers;
mod journal;
mod relay;

use anyhow::anyhow;
use config::Config;
use envconfig::Envconfig;
use journal::EventJournal;
use relay::{LivenessSampler, RelayService, SystemClock};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::init_from_env()
        .map_err(|e| anyhow!("failed to load configuration from env: {}", e))?;
    config.validate()?;

    let journal = EventJournal::open(&config.log_dir).await?;
    let (service, events) = RelayService::new(config.relay_config(), Arc::new(SystemClock));

    let shutdown = CancellationToken::new();

    let sampler = LivenessSampler::new(service.clone(), config.sample_interval());
    let sampler_task = {
        let cancel = shutdown.clone();
        tokio::spawn(async move { sampler.run(cancel).await })
    };

    {
        let cancel = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown requested");
                    cancel.cancel();
                }
                Err(e) => error!("Failed to listen for shutdown signal: {}", e),
            }
        });
    }

    let listener = TcpListener::bind(config.bind()).await?;
    let running = format!("Command queue running at http://{}", config.bind());
    info!("{}", running);
    journal.record(&running).await;

    let journal_task = tokio::spawn(journal.run(events));

    let app = handlers::app(service);
    let cancel = shutdown.clone();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await;

    shutdown.cancel();
    sampler_task.await?;
    // Journal ends once the last service handle is gone
    journal_task.await?;

    served.map_err(|e| anyhow!("relay http server failed: {}", e))
}
