//! Type definitions shared by the recipe API and its client.
//!
//! ## Key Types
//!
//! - [`Recipe`] - A stored recipe as it appears on the wire
//! - [`RecipeInput`] - A candidate recipe submitted for create or update
//! - [`RecipeFields`] - A candidate that has passed validation and been normalized
//! - [`ApiEnvelope`] - The `{success, data|error}` wrapper used by every response
//!
//! ## Wire Format
//!
//! Field names are camelCase and the identifier is emitted as `_id`, the
//! document database's native key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe record held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Store-assigned identifier (24-char hex object id)
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique, trimmed title
    pub title: String,
    /// Ingredient lines, in order
    pub ingredients: Vec<String>,
    /// Instruction steps, in order
    pub instructions: Vec<String>,
    /// Cooking time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    /// Number of servings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    /// HTTP(S) image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Set once on insert
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a record from validated fields.
    pub fn from_fields(id: String, fields: RecipeFields, created_at: DateTime<Utc>) -> Self {
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

/// Candidate recipe payload for create and update requests.
///
/// Every field is optional at the type level so that a missing field is
/// reported as a validation message instead of a decoding failure. Unknown
/// keys (such as `_id` or `createdAt` echoed back by a client) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Recipe> for RecipeInput {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: Some(recipe.title.clone()),
            ingredients: Some(recipe.ingredients.clone()),
            instructions: Some(recipe.instructions.clone()),
            cooking_time: recipe.cooking_time.map(i64::from),
            servings: recipe.servings.map(i64::from),
            image_url: recipe.image_url.clone(),
        }
    }
}

/// A candidate that satisfied every recipe constraint.
///
/// Produced only by [`crate::validation::validate_recipe`]; titles and list
/// entries are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub image_url: Option<String>,
}

/// Response wrapper used by every API endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ErrorDetail) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Error payload: a single message, or one message per violated field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Messages(Vec<String>),
}

impl ErrorDetail {
    pub fn into_messages(self) -> Vec<String> {
        match self {
            ErrorDetail::Message(message) => vec![message],
            ErrorDetail::Messages(messages) => messages,
        }
    }
}

/// Empty object payload returned by a successful delete (`"data": {}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}
