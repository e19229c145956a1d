//! Articles API server.
//!
//! Loads configuration, initializes logging, wires the store, service and
//! handlers, then serves until SIGINT/SIGTERM.

use clap::Parser;
use std::path::PathBuf;

use articles_api::config;
use articles_api::lifecycle::{signals, Application, Shutdown};
use articles_api::observability::logging;

#[derive(Parser)]
#[command(name = "articles-api")]
#[command(about = "CRUD HTTP API for articles", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    logging::init(config.env, &config.observability)?;
    tracing::debug!("Debug messages are enabled");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        read_timeout_secs = config.timeouts.read_secs,
        write_timeout_secs = config.timeouts.write_secs,
        "Configuration loaded"
    );

    let app = Application::build(config).await?;
    tracing::info!(address = %app.local_addr(), "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::forward_to(shutdown));

    app.run(server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
