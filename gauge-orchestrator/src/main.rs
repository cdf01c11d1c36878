use std::sync::Arc;

use anyhow::Context;
use gauge_orchestrator::api::{self, AppState};
use gauge_orchestrator::channel::ContainerChannel;
use gauge_orchestrator::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gauge_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gauge Orchestrator...");

    let settings = Settings::from_env();
    settings.validate()?;
    tracing::info!(
        "Worker container: {} via {}, data dir: {}",
        settings.container_name,
        settings.container_runtime,
        settings.data_dir.display()
    );

    let channel = ContainerChannel::new(
        settings.container_runtime.clone(),
        settings.container_name.clone(),
        settings.exec_timeout,
    );

    // The container may come up later; requests degrade until it does.
    if let Err(e) = channel.check_runtime_available().await {
        tracing::warn!("{}", e);
    }

    let addr = settings.bind_addr.clone();
    let app = api::create_router(AppState::new(settings, Arc::new(channel)));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
