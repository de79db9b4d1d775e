//! # Recipe HTTP API
//!
//! Stateless axum handlers over a shared [`RecipeStore`]. Every response
//! uses the [`ApiEnvelope`](crate::types::ApiEnvelope) shape; store failures
//! are mapped to status codes in [`error`].
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/api/recipes` | [`handlers::list_recipes`] |
//! | POST | `/api/recipes` | [`handlers::create_recipe`] |
//! | GET | `/api/recipes/:id` | [`handlers::get_recipe`] |
//! | PUT | `/api/recipes/:id` | [`handlers::update_recipe`] |
//! | DELETE | `/api/recipes/:id` | [`handlers::delete_recipe`] |
//! | GET | `/health` | [`handlers::health`] |

use std::sync::Arc;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::store::RecipeStore;

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
}

/// Builds the API router with CORS restricted to `allowed_origins`.
pub fn router(store: Arc<dyn RecipeStore>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route(
            "/api/recipes/:id",
            get(handlers::get_recipe)
                .put(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(AppState { store })
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Serves `app` until `shutdown` is cancelled, then drains in-flight requests.
pub async fn serve(listener: TcpListener, app: Router, shutdown: CancellationToken) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
