mod command;
mod config;
mod connection;
mod drivetrain;

use anyhow::anyhow;
use command::DriveExecutor;
use config::AgentConfig;
use connection::{heartbeat_loop, poll_loop, RelayClient};
use drivetrain::LoggingDrivetrain;
use envconfig::Envconfig;
use tokio_util::sync::CancellationToken;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AgentConfig::init_from_env()
        .map_err(|e| anyhow!("failed to load configuration from env: {}", e))?;
    config.validate()?;

    info!("Rover agent starting");
    info!("  Relay: {}", config.relay_url);
    info!("  Poll interval: {:?}", config.poll_interval());

    let client = RelayClient::new(&config.relay_url, config.request_timeout())?;
    let shutdown = CancellationToken::new();

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

    let heartbeat_task = tokio::spawn(heartbeat_loop(
        client.clone(),
        config.heartbeat_interval(),
        shutdown.clone(),
    ));

    let mut executor = DriveExecutor::new(LoggingDrivetrain);
    poll_loop(&client, &mut executor, config.poll_interval(), shutdown.clone()).await;

    // Never leave the motors running on exit
    if let Err(e) = executor.halt().await {
        error!("Failed to stop drivetrain: {}", e);
    }
    heartbeat_task.await?;

    info!("Rover agent stopped");
    Ok(())
}
