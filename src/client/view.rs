//! Screen view-state for recipe front ends.
//!
//! Each screen keeps what it shows in an explicit state object that moves
//! `Idle → Loading → Loaded | Failed`. A front end renders from these
//! objects and calls their async methods in response to user actions; there
//! is no ambient mutable state.
//!
//! Every request-driven transition also comes as a `begin_*`/`finish_*`
//! pair. A front end that issues the request itself calls `begin_*`,
//! renders the in-progress state while the request runs, then hands the
//! result to `finish_*`. The async convenience methods do the same in one
//! call.

use crate::client::error::ClientError;
use crate::client::form::{FormError, RecipeForm};
use crate::client::RecipeClient;
use crate::types::{Recipe, RecipeInput};

pub const LIST_LOAD_FAILED: &str = "Failed to load recipes. Please try again later.";
pub const DETAIL_LOAD_FAILED: &str = "Failed to load recipe details.";
pub const EDIT_LOAD_FAILED: &str = "Failed to load recipe data.";
pub const SAVE_FAILED: &str = "Failed to save recipe. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete recipe.";
pub const DELETED_NOTICE: &str = "Recipe deleted!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    /// Message to show next to a "try again" action.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The recipe list screen: fetched list, search text, and a transient notice.
#[derive(Debug, Default)]
pub struct RecipeListView {
    state: LoadState<Vec<Recipe>>,
    search_query: String,
    notice: Option<String>,
}

/// A delete the user asked for but has not confirmed yet.
///
/// Only [`RecipeListView::request_delete`] creates one, so no delete request
/// can be issued without passing through a confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending delete does nothing until confirmed"]
pub struct PendingDelete {
    id: String,
    title: String,
}

impl PendingDelete {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Prompt text for the confirmation dialog.
    pub fn prompt(&self) -> String {
        format!("Delete \"{}\"? This cannot be undone.", self.title)
    }
}

impl RecipeListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<Vec<Recipe>> {
        &self.state
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Called every time the list screen becomes active.
    pub async fn on_focus(&mut self, client: &RecipeClient) {
        tracing::debug!("Recipe list focused, refetching");
        self.refresh(client).await;
    }

    pub async fn retry(&mut self, client: &RecipeClient) {
        self.refresh(client).await;
    }

    pub async fn refresh(&mut self, client: &RecipeClient) {
        self.begin_refresh();
        let result = client.list_recipes().await;
        self.finish_refresh(result);
    }

    pub fn begin_refresh(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn finish_refresh(&mut self, result: Result<Vec<Recipe>, ClientError>) {
        self.state = match result {
            Ok(recipes) => LoadState::Loaded(recipes),
            Err(e) => {
                tracing::error!("Error loading recipes: {}", e);
                LoadState::Failed(LIST_LOAD_FAILED.to_string())
            }
        };
    }

    /// Recipes whose title contains the search text, ignoring case.
    ///
    /// Filtering is local; it never touches the network.
    pub fn visible_recipes(&self) -> Vec<&Recipe> {
        let Some(recipes) = self.state.loaded() else {
            return Vec::new();
        };
        let needle = self.search_query.to_lowercase();
        recipes
            .iter()
            .filter(|recipe| recipe.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Starts a delete; returns `None` if `id` is not in the loaded list.
    pub fn request_delete(&self, id: &str) -> Option<PendingDelete> {
        self.state
            .loaded()?
            .iter()
            .find(|recipe| recipe.id == id)
            .map(|recipe| PendingDelete {
                id: recipe.id.clone(),
                title: recipe.title.clone(),
            })
    }

    /// Issues a confirmed delete, then refetches the list.
    pub async fn confirm_delete(&mut self, client: &RecipeClient, pending: PendingDelete) -> Result<(), ClientError> {
        match client.delete_recipe(&pending.id).await {
            Ok(()) => {
                self.notice = Some(DELETED_NOTICE.to_string());
                self.refresh(client).await;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting recipe {}: {}", pending.id, e);
                self.notice = Some(DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }
}

/// The single-recipe screen.
#[derive(Debug)]
pub struct RecipeDetailView {
    id: String,
    state: LoadState<Recipe>,
}

impl RecipeDetailView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: LoadState::Idle,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &LoadState<Recipe> {
        &self.state
    }

    pub async fn load(&mut self, client: &RecipeClient) {
        self.begin_load();
        let result = client.get_recipe(&self.id).await;
        self.finish_load(result);
    }

    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Recipe, ClientError>) {
        self.state = match result {
            Ok(recipe) => LoadState::Loaded(recipe),
            Err(e) => {
                tracing::error!("Error loading recipe details: {}", e);
                LoadState::Failed(e.user_message(DETAIL_LOAD_FAILED))
            }
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    Editing,
    Loading,
    Saving,
    Saved(Recipe),
    /// Message for the error dialog; the form stays editable.
    Failed(String),
}

/// Why a submit did not produce a saved recipe.
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Request(#[from] ClientError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(e) => e.to_string(),
            SubmitError::Request(e) => e.user_message(SAVE_FAILED),
        }
    }
}

/// The add/edit screen.
#[derive(Debug)]
pub struct RecipeEditor {
    mode: EditorMode,
    pub form: RecipeForm,
    status: EditorStatus,
}

impl RecipeEditor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: RecipeForm::default(),
            status: EditorStatus::Editing,
        }
    }

    pub fn edit(id: impl Into<String>) -> Self {
        Self {
            mode: EditorMode::Edit { id: id.into() },
            form: RecipeForm::default(),
            status: EditorStatus::Editing,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn status(&self) -> &EditorStatus {
        &self.status
    }

    /// Pre-fills the form from the server when editing; no-op when creating.
    pub async fn load(&mut self, client: &RecipeClient) {
        let Some(id) = self.begin_load() else {
            return;
        };
        let result = client.get_recipe(&id).await;
        self.finish_load(result);
    }

    /// Enters `Loading` and returns the id to fetch, or `None` when creating.
    pub fn begin_load(&mut self) -> Option<String> {
        let EditorMode::Edit { id } = &self.mode else {
            return None;
        };
        let id = id.clone();
        self.status = EditorStatus::Loading;
        Some(id)
    }

    pub fn finish_load(&mut self, result: Result<Recipe, ClientError>) {
        match result {
            Ok(recipe) => {
                self.form = RecipeForm::from_recipe(&recipe);
                self.status = EditorStatus::Editing;
            }
            Err(e) => {
                tracing::error!("Failed to fetch recipe for editing: {}", e);
                self.status = EditorStatus::Failed(EDIT_LOAD_FAILED.to_string());
            }
        }
    }

    /// Validates locally, then creates or updates on the server.
    ///
    /// Nothing is sent when local validation fails.
    pub async fn submit(&mut self, client: &RecipeClient) -> Result<Recipe, SubmitError> {
        let input = self.begin_submit()?;
        let result = match &self.mode {
            EditorMode::Create => client.create_recipe(&input).await,
            EditorMode::Edit { id } => client.update_recipe(id, &input).await,
        };
        self.finish_submit(result)
    }

    /// Validates the form and enters `Saving`, returning the payload to send
    /// with [`RecipeClient::create_recipe`] or [`RecipeClient::update_recipe`]
    /// according to [`Self::mode`].
    pub fn begin_submit(&mut self) -> Result<RecipeInput, SubmitError> {
        match self.form.validate() {
            Ok(input) => {
                self.status = EditorStatus::Saving;
                Ok(input)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub fn finish_submit(&mut self, result: Result<Recipe, ClientError>) -> Result<Recipe, SubmitError> {
        match result {
            Ok(recipe) => {
                self.status = EditorStatus::Saved(recipe.clone());
                Ok(recipe)
            }
            Err(e) => {
                tracing::error!("Error saving recipe: {}", e);
                Err(self.fail(e.into()))
            }
        }
    }

    fn fail(&mut self, error: SubmitError) -> SubmitError {
        self.status = EditorStatus::Failed(error.user_message());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recipe(id: &str, title: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            ingredients: vec!["Water".to_string()],
            instructions: vec!["Boil".to_string()],
            cooking_time: None,
            servings: None,
            image_url: None,
            created_at: "2024-03-01T12:00:00Z".parse().unwrap(),
        }
    }

    fn loaded_list() -> RecipeListView {
        RecipeListView {
            state: LoadState::Loaded(vec![
                recipe("a", "Tomato Soup"),
                recipe("b", "Banana Bread"),
                recipe("c", "Souper Salad"),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut view = loaded_list();
        view.set_search_query("SOUP");
        let titles: Vec<&str> = view.visible_recipes().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Tomato Soup", "Souper Salad"]);

        view.set_search_query("");
        assert_eq!(view.visible_recipes().len(), 3);

        view.set_search_query("pizza");
        assert!(view.visible_recipes().is_empty());
    }

    #[test]
    fn nothing_is_visible_before_loading() {
        let view = RecipeListView::new();
        assert_eq!(view.state(), &LoadState::Idle);
        assert!(view.visible_recipes().is_empty());
    }

    #[test]
    fn delete_needs_a_known_recipe() {
        let view = loaded_list();
        let pending = view.request_delete("b").unwrap();
        assert_eq!(pending.id(), "b");
        assert!(pending.prompt().contains("Banana Bread"));
        assert_eq!(view.request_delete("zzz"), None);
        assert_eq!(RecipeListView::new().request_delete("b"), None);
    }

    #[test]
    fn load_state_accessors() {
        let failed: LoadState<()> = LoadState::Failed(LIST_LOAD_FAILED.to_string());
        assert!(failed.can_retry());
        assert_eq!(failed.error(), Some(LIST_LOAD_FAILED));
        assert!(!LoadState::<()>::Loading.can_retry());
        assert!(LoadState::<()>::Loading.is_loading());
    }

    #[test]
    fn list_is_loading_between_begin_and_finish() {
        let mut view = loaded_list();
        view.begin_refresh();
        assert!(view.state().is_loading());
        assert!(view.visible_recipes().is_empty());

        view.finish_refresh(Ok(vec![recipe("a", "Tomato Soup")]));
        assert_eq!(view.visible_recipes().len(), 1);

        view.begin_refresh();
        view.finish_refresh(Err(ClientError::UnexpectedResponse {
            status: 502,
            body: String::new(),
        }));
        assert_eq!(view.state().error(), Some(LIST_LOAD_FAILED));
    }

    #[test]
    fn detail_is_loading_between_begin_and_finish() {
        let mut detail = RecipeDetailView::new("a");
        detail.begin_load();
        assert_eq!(detail.state(), &LoadState::Loading);

        detail.finish_load(Err(ClientError::Api {
            status: 404,
            messages: vec!["Recipe not found".to_string()],
        }));
        assert_eq!(detail.state().error(), Some("Recipe not found"));
    }

    #[test]
    fn editor_load_is_observable() {
        assert_eq!(RecipeEditor::create().begin_load(), None);

        let mut editor = RecipeEditor::edit("a");
        assert_eq!(editor.begin_load().as_deref(), Some("a"));
        assert_eq!(editor.status(), &EditorStatus::Loading);

        editor.finish_load(Ok(recipe("a", "Tomato Soup")));
        assert_eq!(editor.status(), &EditorStatus::Editing);
        assert_eq!(editor.form.title, "Tomato Soup");
    }

    #[test]
    fn editor_is_saving_between_begin_and_finish() {
        let mut editor = RecipeEditor::create();
        editor.form.title = "Tomato Soup".to_string();
        editor.form.ingredients = "Tomatoes".to_string();
        editor.form.instructions = "Simmer".to_string();

        let input = editor.begin_submit().unwrap();
        assert_eq!(input.title.as_deref(), Some("Tomato Soup"));
        assert_eq!(editor.status(), &EditorStatus::Saving);

        let saved = editor.finish_submit(Ok(recipe("a", "Tomato Soup"))).unwrap();
        assert_eq!(editor.status(), &EditorStatus::Saved(saved));
    }

    #[test]
    fn editor_rejected_save_keeps_form() {
        let mut editor = RecipeEditor::create();
        editor.form.title = "Soup".to_string();
        editor.form.ingredients = "Water".to_string();
        editor.form.instructions = "Boil".to_string();
        editor.begin_submit().unwrap();

        let result = editor.finish_submit(Err(ClientError::Api {
            status: 400,
            messages: vec!["A recipe with this title already exists.".to_string()],
        }));
        assert!(matches!(result, Err(SubmitError::Request(_))));
        assert_eq!(
            editor.status(),
            &EditorStatus::Failed("A recipe with this title already exists.".to_string())
        );
        assert_eq!(editor.form.title, "Soup");
    }

    #[test]
    fn invalid_form_never_enters_saving() {
        let mut editor = RecipeEditor::create();
        let err = editor.begin_submit().unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(FormError::TitleRequired)));
        assert_eq!(editor.status(), &EditorStatus::Failed("Recipe Title is required.".to_string()));
    }

    #[test]
    fn invalid_form_message_is_shown_verbatim() {
        let err = SubmitError::from(FormError::TitleRequired);
        assert_eq!(err.user_message(), "Recipe Title is required.");

        let err = SubmitError::from(ClientError::Api {
            status: 400,
            messages: vec!["A recipe with this title already exists.".to_string()],
        });
        assert_eq!(err.user_message(), "A recipe with this title already exists.");
    }
}
