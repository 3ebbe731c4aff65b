use std::sync::Arc;

use anyhow::Context;

use jobboard_api::{app, config::ApiConfig};
use jobboard_infra::lifecycle::ExpirySweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobboard_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(app::AppServices::in_memory(config.retention_policy()));

    let sweeper = config.sweep_interval.map(|interval| {
        ExpirySweeper::new(services.engine.clone(), interval).start()
    });
    if sweeper.is_none() {
        tracing::info!("trash expiry is lazy (TRASH_SWEEP_INTERVAL_SECS not set)");
    }

    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = sweeper {
        handle.stop().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("could not listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
