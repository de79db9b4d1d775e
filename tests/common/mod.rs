#![allow(dead_code)]

use std::sync::{Arc, Once};

use anyhow::Result;
use recipe_catalog::server;
use recipe_catalog::store::{InMemoryRecipeStore, RecipeStore};
use recipe_catalog::{RecipeClient, RecipeInput};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

static INIT_LOGGER: Once = Once::new();

pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("TEST_LOG")
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A recipe API served on an ephemeral local port for the life of the value.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<dyn RecipeStore>,
    shutdown: CancellationToken,
}

impl TestServer {
    /// Starts a server backed by a fresh in-memory store.
    pub async fn start() -> Result<Self> {
        Self::start_with_store(Arc::new(InMemoryRecipeStore::new())).await
    }

    pub async fn start_with_store(store: Arc<dyn RecipeStore>) -> Result<Self> {
        init_test_logging();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let shutdown = CancellationToken::new();

        let app = server::router(Arc::clone(&store), &[]);
        tokio::spawn(server::serve(listener, app, shutdown.clone()));

        Ok(Self {
            base_url,
            store,
            shutdown,
        })
    }

    pub fn client(&self) -> RecipeClient {
        RecipeClient::new(self.base_url.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Base URL of a port nothing is listening on.
pub async fn unreachable_base_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{address}"))
}

pub fn soup() -> RecipeInput {
    RecipeInput {
        title: Some("Soup".to_string()),
        ingredients: Some(vec!["Water".to_string(), "Salt".to_string()]),
        instructions: Some(vec!["Boil water".to_string(), "Add salt".to_string()]),
        ..Default::default()
    }
}

pub fn titled(title: &str) -> RecipeInput {
    RecipeInput {
        title: Some(title.to_string()),
        ..soup()
    }
}
