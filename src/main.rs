// src/main.rs
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use automater::{
    checks,
    cli::{Cli, Commands},
    config::MonitorConfig,
    logging,
    scheduler::Scheduler,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor(args) => {
            let config = MonitorConfig::from(args);
            logging::init(config.log_mode);

            let strategies = checks::default_strategies()?;
            let scheduler = Arc::new(Scheduler::new(config, strategies));

            let signal_scheduler = scheduler.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                signal_scheduler.shutdown();
            });

            // `run` has already logged the configuration error.
            if scheduler.run().await.is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
