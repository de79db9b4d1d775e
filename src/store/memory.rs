use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{creation_timestamp, RecipeStore, StoreError, StoreResult};
use crate::types::{Recipe, RecipeInput};
use crate::validation::validate_recipe;

/// In-process recipe store.
///
/// Ids are generated in the same object-id format the MongoDB backend uses,
/// so clients cannot tell the two apart. The uniqueness check and the write
/// happen under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn find(&self) -> StoreResult<Vec<Recipe>> {
        Ok(self.recipes.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().find(|recipe| recipe.id == id).cloned())
    }

    async fn create(&self, input: RecipeInput) -> StoreResult<Recipe> {
        let fields = validate_recipe(&input).map_err(StoreError::Validation)?;

        let mut recipes = self.recipes.write().await;
        if recipes.iter().any(|recipe| recipe.title == fields.title) {
            tracing::debug!("Rejecting duplicate title: {}", fields.title);
            return Err(StoreError::DuplicateTitle);
        }

        let recipe = Recipe::from_fields(ObjectId::new().to_hex(), fields, creation_timestamp());
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id_and_update(&self, id: &str, input: RecipeInput) -> StoreResult<Option<Recipe>> {
        let fields = validate_recipe(&input).map_err(StoreError::Validation)?;

        let mut recipes = self.recipes.write().await;
        let Some(index) = recipes.iter().position(|recipe| recipe.id == id) else {
            return Ok(None);
        };
        if recipes
            .iter()
            .any(|recipe| recipe.id != id && recipe.title == fields.title)
        {
            return Err(StoreError::DuplicateTitle);
        }

        let updated = Recipe::from_fields(id.to_string(), fields, recipes[index].created_at);
        recipes[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Recipe>> {
        let mut recipes = self.recipes.write().await;
        let Some(index) = recipes.iter().position(|recipe| recipe.id == id) else {
            return Ok(None);
        };
        Ok(Some(recipes.remove(index)))
    }
}
