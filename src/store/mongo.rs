//! MongoDB-backed recipe store.
//!
//! Recipes live in the `recipes` collection. A unique index on `title` is
//! ensured on connect; the database rejects colliding writes with error code
//! 11000, which surfaces as [`StoreError::DuplicateTitle`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndReplaceOptions, FindOptions, IndexOptions, ReturnDocument},
    Client, Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use super::{creation_timestamp, RecipeStore, StoreError, StoreResult};
use crate::types::{Recipe, RecipeFields, RecipeInput};
use crate::validation::validate_recipe;

pub const COLLECTION: &str = "recipes";
pub const DEFAULT_DATABASE: &str = "recipe-app";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Stored shape of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cooking_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl RecipeDocument {
    fn new(id: ObjectId, fields: RecipeFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            ingredients: fields.ingredients,
            instructions: fields.instructions,
            cooking_time: fields.cooking_time,
            servings: fields.servings,
            image_url: fields.image_url,
            created_at,
        }
    }
}

impl From<RecipeDocument> for Recipe {
    fn from(document: RecipeDocument) -> Self {
        Recipe {
            id: document.id.to_hex(),
            title: document.title,
            ingredients: document.ingredients,
            instructions: document.instructions,
            cooking_time: document.cooking_time,
            servings: document.servings,
            image_url: document.image_url,
            created_at: document.created_at,
        }
    }
}

pub struct MongoRecipeStore {
    collection: Collection<RecipeDocument>,
}

impl MongoRecipeStore {
    /// Connects, verifies the server answers, and ensures the title index.
    ///
    /// When `database` is `None` the database named in the connection string
    /// is used, falling back to [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>) -> StoreResult<Self> {
        tracing::debug!("Connecting to MongoDB");
        let client = Client::with_uri_str(uri).await.map_err(unavailable)?;

        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(unavailable)?;
        tracing::info!("MongoDB connected, using database '{}'", database.name());

        let store = Self {
            collection: database.collection::<RecipeDocument>(COLLECTION),
        };
        store.ensure_title_index().await?;
        Ok(store)
    }

    async fn ensure_title_index(&self) -> StoreResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(options)
            .build();

        self.collection
            .create_index(model, None)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    /// Removes every recipe. Intended for test fixtures.
    pub async fn clear(&self) -> StoreResult<()> {
        self.collection
            .delete_many(doc! {}, None)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn find(&self) -> StoreResult<Vec<Recipe>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let documents: Vec<RecipeDocument> = self
            .collection
            .find(None, options)
            .await
            .map_err(unavailable)?
            .try_collect()
            .await
            .map_err(unavailable)?;

        Ok(documents.into_iter().map(Recipe::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Recipe>> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one(doc! { "_id": object_id }, None)
            .await
            .map_err(unavailable)?;
        Ok(document.map(Recipe::from))
    }

    async fn create(&self, input: RecipeInput) -> StoreResult<Recipe> {
        let fields = validate_recipe(&input).map_err(StoreError::Validation)?;
        let document = RecipeDocument::new(ObjectId::new(), fields, creation_timestamp());

        self.collection
            .insert_one(&document, None)
            .await
            .map_err(write_error)?;
        Ok(document.into())
    }

    async fn find_by_id_and_update(&self, id: &str, input: RecipeInput) -> StoreResult<Option<Recipe>> {
        let fields = validate_recipe(&input).map_err(StoreError::Validation)?;
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        let Some(existing) = self
            .collection
            .find_one(doc! { "_id": object_id }, None)
            .await
            .map_err(unavailable)?
        else {
            return Ok(None);
        };

        let replacement = RecipeDocument::new(object_id, fields, existing.created_at);
        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_replace(doc! { "_id": object_id }, &replacement, options)
            .await
            .map_err(write_error)?;
        Ok(updated.map(Recipe::from))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Recipe>> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": object_id }, None)
            .await
            .map_err(unavailable)?;
        Ok(removed.map(Recipe::from))
    }
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn unavailable(error: mongodb::error::Error) -> StoreError {
    tracing::error!("MongoDB operation failed: {}", error);
    StoreError::Unavailable(Box::new(error))
}

fn write_error(error: mongodb::error::Error) -> StoreError {
    if is_duplicate_key(&error) {
        StoreError::DuplicateTitle
    } else {
        unavailable(error)
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
