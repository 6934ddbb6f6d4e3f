use anyhow::{Context, Result};

use loglens::config::Config;
use loglens::{facility, viewer};

#[tokio::main]
async fn main() -> Result<()> {
    // Operator diagnostics go to stderr; the log files belong to the facility
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loglens=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let credentials = config.credentials()?;
    let addr = config.socket_addr()?;

    // Fatal if the log directory cannot be created
    let log = facility::init(&config.log_dir).context("Failed to initialize log facility")?;
    facility::install_panic_capture();

    let handle = viewer::start(addr, config.log_dir.clone(), credentials).await?;
    tracing::info!("LogLens running at http://{}", handle.addr());
    log.info("default", "loglens started");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    handle.shutdown()
}
