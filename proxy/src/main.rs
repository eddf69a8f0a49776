use std::sync::Arc;

use anyhow::{Context, Result};
use proxy::{build_router, ProxyConfig, ProxyState};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
    log::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ProxyConfig::from_env().context("Invalid proxy configuration")?;
    if !config.static_dir.is_dir() {
        log::warn!(
            "Static directory {} does not exist; only /v1 will be served",
            config.static_dir.display()
        );
    }

    let state = Arc::new(ProxyState::new(config.upstream.clone())?);
    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    log::info!("Server running at http://{}", listener.local_addr()?);
    log::info!("Proxying /v1 requests to {}", config.upstream);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}
