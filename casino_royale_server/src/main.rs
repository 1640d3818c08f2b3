mod api;
mod config;
mod error;
mod store;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::{AppState, SharedState};
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();
    let state = SharedState::new(AppState::new(&config));
    let app = api::router(state);

    if let Some(seed) = config.seed {
        info!("使用固定发牌种子 {}", seed);
    }
    info!("服务器正在监听 {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
