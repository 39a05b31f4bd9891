//! IPAM Registry API - Main Entry Point

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ipam_registry::application::use_cases::RestoreSnapshotUseCase;
use ipam_registry::domain::models::snapshot::RegistrySnapshot;
use ipam_registry::infrastructure::driven_adapters::config::AppConfig;
use ipam_registry::infrastructure::driven_adapters::InMemoryGroupRegistry;
use ipam_registry::infrastructure::driving_adapters::api_rest::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ipam_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Create registry
    let group_registry = Arc::new(InMemoryGroupRegistry::new());

    // Seed from a snapshot file if configured
    if let Some(path) = &config.registry.initial_snapshot {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let snapshot: RegistrySnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        RestoreSnapshotUseCase::new(group_registry.clone())
            .execute(snapshot)
            .with_context(|| format!("restoring snapshot {}", path.display()))?;
        tracing::info!(path = %path.display(), "Initial snapshot restored");
    }

    // Build router
    let app_state = AppState::new(Arc::new(config.clone()), group_registry);
    let app = api_rest::router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
