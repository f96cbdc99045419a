use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};

use crate::AppState;

/// Require `Authorization: Bearer <token>` naming a registered token.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let tokens = state.tokens.clone();
    let valid = tokio::task::spawn_blocking(move || tokens.contains(&token))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("Token lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if !valid {
        warn!("Rejected request to {} with unregistered token", req.uri().path());
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}
