//! # Recipe Store
//!
//! Persistence for recipe documents. Both backends validate candidates with
//! [`crate::validation::validate_recipe`] before writing and enforce title
//! uniqueness at the point of write, so two racing creates with the same
//! title resolve to one success and one [`StoreError::DuplicateTitle`].
//!
//! ## Modules
//!
//! - [`memory`] - Lock-guarded in-process store for tests and local runs
//! - [`mongo`] - MongoDB-backed store used in production

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

use crate::types::{Recipe, RecipeInput};

pub mod memory;
pub mod mongo;

pub use memory::InMemoryRecipeStore;
pub use mongo::MongoRecipeStore;

/// Failures a store write or read can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// One or more field constraints were violated.
    #[error("recipe validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Another recipe already uses this title.
    #[error("a recipe with this title already exists")]
    DuplicateTitle,

    /// The backing database could not complete the operation.
    #[error("recipe store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Creation time at the millisecond precision BSON dates can hold.
pub(crate) fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// CRUD contract over the recipe collection.
///
/// Lookups by an id that names no recipe (including ids that are not
/// well-formed) yield `Ok(None)`.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes, in insertion order.
    async fn find(&self) -> StoreResult<Vec<Recipe>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Recipe>>;

    /// Validates and inserts a new recipe, assigning its id and creation time.
    async fn create(&self, input: RecipeInput) -> StoreResult<Recipe>;

    /// Validates `input` and replaces every mutable field of the recipe.
    ///
    /// `id` and `created_at` are preserved; optional fields absent from
    /// `input` are cleared.
    async fn find_by_id_and_update(&self, id: &str, input: RecipeInput) -> StoreResult<Option<Recipe>>;

    /// Removes the recipe and returns its last state.
    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Recipe>>;
}
