use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aahar_server::{app, bootstrap, spawn_session_sweeper, Config};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let port = config.port;
    let state = bootstrap(config).await?;
    spawn_session_sweeper(state.sessions.clone(), SWEEP_INTERVAL);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "aahar server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
