//! Recipe constraints shared by the stores and the client form.
//!
//! [`validate_recipe`] checks every rule and reports all violations at once,
//! in field order, using the messages callers see in 400 responses.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{RecipeFields, RecipeInput};

/// Counted in UTF-16 code units, the unit JavaScript string lengths use.
pub const TITLE_MAX_UNITS: usize = 100;

pub const TITLE_REQUIRED: &str = "Please add a title for the recipe";
pub const TITLE_TOO_LONG: &str = "Title cannot be more than 100 characters";
pub const INGREDIENTS_REQUIRED: &str = "Please add at least one ingredient";
pub const INGREDIENTS_BLANK: &str = "Ingredients cannot contain blank entries";
pub const INSTRUCTIONS_REQUIRED: &str = "Please add at least one instruction step";
pub const INSTRUCTIONS_BLANK: &str = "Instructions cannot contain blank entries";
pub const COOKING_TIME_MIN: &str = "Cooking time must be at least 1 minute";
pub const COOKING_TIME_MAX: &str = "Cooking time is too large";
pub const SERVINGS_MIN: &str = "Servings must be at least 1";
pub const SERVINGS_MAX: &str = "Servings is too large";
pub const IMAGE_URL_INVALID: &str = "Please use a valid URL for the image";

const IMAGE_URL_PATTERN: &str = r"^https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b(?:[-a-zA-Z0-9()@:%_+.~#?&/=]*)$";

static IMAGE_URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn image_url_regex() -> &'static Regex {
    IMAGE_URL_REGEX
        .get_or_init(|| Regex::new(IMAGE_URL_PATTERN).expect("image URL pattern compiles"))
}

/// Whether `url` looks like an HTTP(S) address with a host and TLD.
pub fn is_valid_image_url(url: &str) -> bool {
    image_url_regex().is_match(url)
}

/// Validates and normalizes a candidate recipe.
///
/// On failure the error holds one message per violated rule.
pub fn validate_recipe(input: &RecipeInput) -> Result<RecipeFields, Vec<String>> {
    let mut errors = Vec::new();

    let title = input.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        errors.push(TITLE_REQUIRED.to_string());
    } else if title.encode_utf16().count() > TITLE_MAX_UNITS {
        errors.push(TITLE_TOO_LONG.to_string());
    }

    let ingredients = normalize_lines(
        input.ingredients.as_deref(),
        INGREDIENTS_REQUIRED,
        INGREDIENTS_BLANK,
        &mut errors,
    );
    let instructions = normalize_lines(
        input.instructions.as_deref(),
        INSTRUCTIONS_REQUIRED,
        INSTRUCTIONS_BLANK,
        &mut errors,
    );

    let cooking_time = check_minimum(input.cooking_time, COOKING_TIME_MIN, COOKING_TIME_MAX, &mut errors);
    let servings = check_minimum(input.servings, SERVINGS_MIN, SERVINGS_MAX, &mut errors);

    // An empty string is treated as no image at all.
    let image_url = input
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    if let Some(url) = image_url {
        if !is_valid_image_url(url) {
            errors.push(IMAGE_URL_INVALID.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RecipeFields {
        title: title.to_string(),
        ingredients,
        instructions,
        cooking_time,
        servings,
        image_url: image_url.map(str::to_string),
    })
}

fn normalize_lines(
    lines: Option<&[String]>,
    required: &str,
    blank: &str,
    errors: &mut Vec<String>,
) -> Vec<String> {
    let lines = lines.unwrap_or_default();
    if lines.is_empty() {
        errors.push(required.to_string());
        return Vec::new();
    }

    let trimmed: Vec<String> = lines.iter().map(|line| line.trim().to_string()).collect();
    if trimmed.iter().any(String::is_empty) {
        errors.push(blank.to_string());
    }
    trimmed
}

fn check_minimum(
    value: Option<i64>,
    below_min: &str,
    above_max: &str,
    errors: &mut Vec<String>,
) -> Option<u32> {
    let value = value?;
    if value < 1 {
        errors.push(below_min.to_string());
        return None;
    }
    match u32::try_from(value) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(above_max.to_string());
            None
        }
    }
}
