//! Tower of Hanoi game server binary.

use anyhow::Result;
use clap::Parser;
use hanoi_server::{ApiState, ServerConfig, SessionManager, router};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Tower of Hanoi game server.
#[derive(Parser, Debug)]
#[command(name = "hanoi_server")]
#[command(about = "HTTP game server for the Tower of Hanoi puzzle", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    config.apply_overrides(cli.host, cli.port);

    let app = router(ApiState::new(SessionManager::new()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Server ready at http://{}", config.bind_addr());
    info!("Browser clients can call /state, /reset, /start, /move, /advance");

    axum::serve(listener, app).await?;

    Ok(())
}
