//! # Recipe API Client
//!
//! A typed HTTP client for the recipe API plus the UI-agnostic screen state
//! a front end renders from.
//!
//! ## Modules
//!
//! - [`client`] - HTTP client with one method per API operation
//! - [`error`] - Client failures and user-facing messages
//! - [`form`] - Add/edit form with local pre-validation
//! - [`view`] - List, detail, and editor view-state
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_catalog::client::{RecipeClient, RecipeListView};
//!
//! # async fn example() {
//! let client = RecipeClient::new("http://localhost:5001".to_string());
//! let mut list = RecipeListView::new();
//!
//! list.on_focus(&client).await;
//! list.set_search_query("soup");
//! for recipe in list.visible_recipes() {
//!     println!("{}", recipe.title);
//! }
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod error;
pub mod form;
pub mod view;

pub use client::RecipeClient;
pub use error::ClientError;
pub use form::{FormError, RecipeForm};
pub use view::{
    EditorMode, EditorStatus, LoadState, PendingDelete, RecipeDetailView, RecipeEditor, RecipeListView,
    SubmitError,
};
