use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::client::error::ClientError;
use crate::types::{ApiEnvelope, Empty, Recipe, RecipeInput};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RecipeClient {
    base_url: String,
    client: Client,
}

impl RecipeClient {
    /// `base_url` is the server root, e.g. `http://localhost:5001`.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn recipes_url(&self) -> String {
        format!("{}/api/recipes", self.base_url)
    }

    fn recipe_url(&self, id: &str) -> String {
        format!("{}/api/recipes/{}", self.base_url, urlencoding::encode(id))
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, ClientError> {
        let url = self.recipes_url();
        tracing::debug!("Fetching recipes from: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error fetching recipes: {}", e);
                ClientError::Http(e)
            })?;

        let recipes: Vec<Recipe> = read_envelope(response).await?;
        tracing::debug!("Fetched {} recipes", recipes.len());
        Ok(recipes)
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, ClientError> {
        let response = self
            .client
            .get(self.recipe_url(id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        read_envelope(response).await
    }

    pub async fn create_recipe(&self, input: &RecipeInput) -> Result<Recipe, ClientError> {
        let response = self
            .client
            .post(self.recipes_url())
            .json(input)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let recipe: Recipe = read_envelope(response).await?;
        tracing::info!("Created recipe {}", recipe.id);
        Ok(recipe)
    }

    pub async fn update_recipe(&self, id: &str, input: &RecipeInput) -> Result<Recipe, ClientError> {
        let response = self
            .client
            .put(self.recipe_url(id))
            .json(input)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        read_envelope(response).await
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.recipe_url(id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let _: Empty = read_envelope(response).await?;
        tracing::info!("Deleted recipe {}", id);
        Ok(())
    }
}

/// Unwraps `{success, data|error}`, turning error envelopes into
/// [`ClientError::Api`] with the server's messages intact.
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    tracing::debug!("Recipe API response status: {}", status);

    let envelope: ApiEnvelope<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!("Failed to parse recipe API response ({}): {}", status, e);
            return Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }
    };

    if status.is_success() && envelope.success {
        if let Some(data) = envelope.data {
            return Ok(data);
        }
    }

    match envelope.error {
        Some(detail) => {
            let messages = detail.into_messages();
            tracing::warn!("Recipe API returned {}: {:?}", status, messages);
            Err(ClientError::Api {
                status: status.as_u16(),
                messages,
            })
        }
        None => Err(ClientError::UnexpectedResponse {
            status: status.as_u16(),
            body,
        }),
    }
}
