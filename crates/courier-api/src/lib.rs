//! Poll-only message retrieval: validation, cursor windowing and the HTTP
//! surface around them.

pub mod error;
pub mod messages;
pub mod middleware;
pub mod pagination;
pub mod store;
pub mod validate;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tracing::warn;

use crate::store::{MessageStore, TokenRegistry};

pub type AppState = Arc<AppStateInner>;

/// Process-wide collaborators, built once at startup and shared by every handler.
pub struct AppStateInner {
    pub store: Arc<dyn MessageStore>,
    pub tokens: Arc<dyn TokenRegistry>,
    /// Lifetime given to published messages; `None` keeps them forever.
    pub retention_secs: Option<i64>,
}

pub fn router(state: AppState) -> Router {
    let publish_routes = Router::new()
        .route("/publish/{provider_id}", post(messages::publish_message))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_token,
        ))
        .with_state(state.clone());

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/provider/{*rest}", get(messages::poll_messages))
        .with_state(state)
        .merge(publish_routes)
}

pub async fn index() -> &'static str {
    "(◡ ‿ ◡ ✿)"
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let store = state.store.clone();
    match tokio::task::spawn_blocking(move || store.ping()).await {
        Ok(Ok(())) => (StatusCode::OK, "ok"),
        Ok(Err(e)) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
        Err(e) => {
            warn!("Health check join error: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}
