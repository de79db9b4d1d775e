//! Add/edit form model.
//!
//! Mirrors the server rules so a user hears about obvious mistakes before a
//! round-trip. The server remains the authority: a form that passes here can
//! still be rejected (for example on a duplicate title).

use thiserror::Error;

use crate::types::{Recipe, RecipeInput};
use crate::validation::is_valid_image_url;

/// First failing check of a [`RecipeForm`], with the text shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Recipe Title is required.")]
    TitleRequired,
    #[error("At least one ingredient is required.")]
    IngredientsRequired,
    #[error("At least one instruction step is required.")]
    InstructionsRequired,
    #[error("Please enter a valid URL for the image.")]
    InvalidImageUrl,
    #[error("Cooking time must be a whole number of at least 1.")]
    InvalidCookingTime,
    #[error("Servings must be a whole number of at least 1.")]
    InvalidServings,
}

/// Raw text as typed into the form.
///
/// Ingredients and instructions hold one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: String,
    pub servings: String,
    pub image_url: String,
}

impl RecipeForm {
    /// Pre-fills the form for editing an existing recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.join("\n"),
            instructions: recipe.instructions.join("\n"),
            cooking_time: recipe.cooking_time.map(|v| v.to_string()).unwrap_or_default(),
            servings: recipe.servings.map(|v| v.to_string()).unwrap_or_default(),
            image_url: recipe.image_url.clone().unwrap_or_default(),
        }
    }

    /// Checks the form and builds the request payload.
    ///
    /// Stops at the first failure. Blank lines are dropped and the remaining
    /// lines trimmed; empty optional fields are omitted from the payload.
    pub fn validate(&self) -> Result<RecipeInput, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::TitleRequired);
        }

        let ingredients = split_lines(&self.ingredients);
        if ingredients.is_empty() {
            return Err(FormError::IngredientsRequired);
        }

        let instructions = split_lines(&self.instructions);
        if instructions.is_empty() {
            return Err(FormError::InstructionsRequired);
        }

        let image_url = self.image_url.trim();
        if !image_url.is_empty() && !is_valid_image_url(image_url) {
            return Err(FormError::InvalidImageUrl);
        }

        let cooking_time = parse_positive(&self.cooking_time).ok_or(FormError::InvalidCookingTime)?;
        let servings = parse_positive(&self.servings).ok_or(FormError::InvalidServings)?;

        Ok(RecipeInput {
            title: Some(title.to_string()),
            ingredients: Some(ingredients),
            instructions: Some(instructions),
            cooking_time,
            servings,
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
        })
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Some(None)` for an empty field, `Some(Some(n))` for a whole number ≥ 1,
/// `None` for anything else.
fn parse_positive(text: &str) -> Option<Option<i64>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(None);
    }
    match text.parse::<i64>() {
        Ok(value) if value >= 1 => Some(Some(value)),
        _ => None,
    }
}
