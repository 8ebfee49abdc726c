// Section server binary entry point
//
// Purpose: build the configured store once, then serve the Axum router
// Usage: cargo run --bin section_server

use section_tree::{create_router, AppState, MemorySectionStore, MongoSectionStore, ServerConfig, StoreBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "section_tree=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting section server...");

    let config = ServerConfig::from_env()?;
    tracing::info!("Configuration:");
    tracing::info!("  ADDR: {}", config.addr);

    let app = match config.backend {
        StoreBackend::Mongo { uri, database, collection } => {
            tracing::info!("  STORE_BACKEND: mongodb ({}.{})", database, collection);
            let store = MongoSectionStore::connect(&uri, &database, &collection).await?;
            create_router(AppState::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("  STORE_BACKEND: memory (data is lost on exit)");
            create_router(AppState::new(MemorySectionStore::new()))
        }
    };

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Server listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
