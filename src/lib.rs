//! # Recipe Catalog
//!
//! A recipe catalog service: a REST API over a document store of recipes,
//! and a client for front ends that list, show, and edit them.
//!
//! ## Modules
//!
//! - [`server`] - axum handlers for list/get/create/update/delete
//! - [`store`] - the [`RecipeStore`] contract with MongoDB and in-memory backends
//! - [`validation`] - recipe constraints shared by server and client
//! - [`client`] - HTTP client and screen view-state
//! - [`config`] - environment configuration for the server binary
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use recipe_catalog::{server, InMemoryRecipeStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = server::router(Arc::new(InMemoryRecipeStore::new()), &[]);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5001").await?;
//! server::serve(listener, app, tokio_util::sync::CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod server;
pub mod store;
pub mod types;
pub mod validation;

pub use client::RecipeClient;
pub use store::{InMemoryRecipeStore, MongoRecipeStore, RecipeStore, StoreError};
pub use types::{Recipe, RecipeInput};
