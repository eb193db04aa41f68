mod api;
mod config;
mod error;
mod main_lib;

use std::sync::Arc;

use api::app_router;
use config::Config;
use main_lib::{build_state, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Background sync scheduler (hourly tick)
    state.scheduler.start();

    let router = app_router(state.clone());
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;
    Ok(())
}

/// Stop dispatching new syncs on ctrl-c; in-flight attempts run to completion.
async fn shutdown_signal(state: Arc<AppState>) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received, stopping scheduler");
    state.scheduler.stop();
}
