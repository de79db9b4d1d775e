use std::sync::Arc;

use recipe_catalog::config::{ServerConfig, StoreBackend};
use recipe_catalog::server;
use recipe_catalog::store::{InMemoryRecipeStore, MongoRecipeStore, RecipeStore};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let store: Arc<dyn RecipeStore> = match &config.store {
        StoreBackend::Mongo { uri, database } => {
            match MongoRecipeStore::connect(uri, database.as_deref()).await {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    tracing::error!("MongoDB connection error: {}", e);
                    tracing::error!("Please verify MONGO_URI points at a reachable MongoDB server");
                    std::process::exit(1);
                }
            }
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory recipe store; data is lost on shutdown");
            Arc::new(InMemoryRecipeStore::new())
        }
    };

    let app = server::router(store, &config.cors_origins);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Recipe API listening on {}", listener.local_addr()?);

    let ct = CancellationToken::new();
    let server = tokio::spawn(server::serve(listener, app, ct.clone()));

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();
    server.await??;

    Ok(())
}
