// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use anyhow::Context;
use chart_dashboard::application::repository::Repository;
use chart_dashboard::application::store::CollectionStore;
use chart_dashboard::infrastructure::config::{load_app_config, StoreBackend, StoreSettings};
use chart_dashboard::infrastructure::json_file_store::JsonFileStore;
use chart_dashboard::infrastructure::json_server_store::JsonServerStore;
use chart_dashboard::infrastructure::memory_store::MemoryStore;
use chart_dashboard::presentation::app_state::AppState;
use chart_dashboard::presentation::router::build_router;
use mockable::DefaultClock;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("failed to load configuration")?;

    // Create store and repository (infrastructure layer)
    let store = open_store(&config.store).await?;
    let repository = Repository::new(store, Arc::new(DefaultClock));

    // Create services (application layer)
    let state = Arc::new(AppState::new(repository));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.bind_address()?;
    tracing::info!(%addr, backend = ?config.store.backend, "starting chart-dashboard service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

async fn open_store(settings: &StoreSettings) -> anyhow::Result<Arc<dyn CollectionStore>> {
    let store: Arc<dyn CollectionStore> = match settings.backend {
        StoreBackend::Memory if settings.seed => Arc::new(MemoryStore::seeded()),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => {
            let store = JsonFileStore::open(&settings.path, settings.seed)
                .await
                .with_context(|| format!("failed to open {}", settings.path.display()))?;
            tracing::info!(path = %store.path().display(), "using json file store");
            Arc::new(store)
        }
        StoreBackend::JsonServer => {
            tracing::info!(url = %settings.url, "using json-server store");
            Arc::new(JsonServerStore::new(settings.url.clone()))
        }
    };
    Ok(store)
}
