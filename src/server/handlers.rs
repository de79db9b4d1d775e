use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::types::{ApiEnvelope, Empty, Recipe, RecipeInput};

pub async fn list_recipes(State(state): State<AppState>) -> ApiResult<Json<ApiEnvelope<Vec<Recipe>>>> {
    let recipes = state.store.find().await?;
    tracing::debug!("Listing {} recipes", recipes.len());
    Ok(Json(ApiEnvelope::ok(recipes)))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<Recipe>>> {
    let recipe = state.store.find_by_id(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(ApiEnvelope::ok(recipe)))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<Recipe>>)> {
    let Json(input) = payload?;
    let recipe = state.store.create(input).await?;
    tracing::info!("Created recipe {} ({})", recipe.id, recipe.title);
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(recipe))))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> ApiResult<Json<ApiEnvelope<Recipe>>> {
    if state.store.find_by_id(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let Json(input) = payload?;

    // The record can vanish between the lookup and the write.
    let recipe = state
        .store
        .find_by_id_and_update(&id, input)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!("Updated recipe {}", recipe.id);
    Ok(Json(ApiEnvelope::ok(recipe)))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<Empty>>> {
    if state.store.find_by_id(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!("Deleted recipe {}", id);
    Ok(Json(ApiEnvelope::ok(Empty {})))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn route_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "API route not found")
}
