use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use calc_orchestrator::cli::{Cli, Command};
use calc_orchestrator::config::CalcConfig;
use calc_orchestrator::orchestrator::Orchestrator;
use calc_orchestrator::server;
use calc_orchestrator::worker::{HttpTaskSource, SimulatedCost, WorkerPool};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = CalcConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { bind, workers } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(workers) = workers {
                config.computing_power = workers;
            }
            serve(config).await
        }
        Command::Worker { url, workers } => {
            if let Some(url) = url {
                config.orchestrator_url = url;
            }
            if let Some(workers) = workers {
                config.computing_power = workers;
            }
            work(config).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(config: CalcConfig) -> Result<()> {
    let (orch, _processor) = Orchestrator::new(config.queue_capacity, config.processor_backlog);

    let pool = WorkerPool::new(
        Arc::new(orch.clone()),
        SimulatedCost::from_config(&config),
        config.computing_power,
        Duration::from_millis(config.poll_interval_ms),
    );
    let _workers = pool.start();

    let listener = TcpListener::bind(&config.bind).await?;
    server::serve(listener, orch).await?;
    Ok(())
}

async fn work(config: CalcConfig) -> Result<()> {
    tracing::info!("Polling orchestrator at {}", config.orchestrator_url);

    let source = HttpTaskSource::new(&config.orchestrator_url)?;
    let pool = WorkerPool::new(
        Arc::new(source),
        SimulatedCost::from_config(&config),
        config.computing_power,
        Duration::from_millis(config.poll_interval_ms),
    );
    let workers = pool.start();
    if workers.is_empty() {
        tracing::warn!("COMPUTING_POWER is 0, no task will be computed");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down {} workers", workers.len());
    for worker in workers {
        worker.abort();
    }
    Ok(())
}
