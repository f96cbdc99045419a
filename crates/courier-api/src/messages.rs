use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};
use uuid::Uuid;

use courier_types::Message;
use courier_types::api::PublishMessageRequest;
use courier_types::models::ACCESS_ANY;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::pagination;
use crate::validate::validate;

/// Segments of `/provider/{id}/from/{cursor}/limit/{limit}/token/{token}`.
///
/// The route is captured as a wildcard and split here so that an empty cursor
/// segment (`/from//limit/`) still matches and means "start from the beginning".
/// The capture is percent-decoded before splitting, so provider ids, cursors
/// and tokens cannot contain `/` (not even as `%2F`).
#[derive(Debug, PartialEq, Eq)]
pub struct PollPath {
    pub provider_id: String,
    pub cursor: Option<String>,
    pub limit: String,
    pub token: String,
}

impl PollPath {
    /// `rest` is everything after `/provider/`. Returns `None` for any other shape.
    pub fn parse(rest: &str) -> Option<Self> {
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        let parts: Vec<&str> = rest.split('/').collect();

        match parts.as_slice() {
            [provider_id, "from", cursor, "limit", limit, "token", token]
                if !provider_id.is_empty() =>
            {
                Some(Self {
                    provider_id: provider_id.to_string(),
                    cursor: (!cursor.is_empty()).then(|| cursor.to_string()),
                    limit: limit.to_string(),
                    token: token.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// GET /provider/{id}/from/{cursor}/limit/{limit}/token/{token}
pub async fn poll_messages(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> ApiResult<Json<Vec<Message>>> {
    let req = PollPath::parse(&rest).ok_or(ApiError::NotFound)?;
    let provider_id = req.provider_id.clone();

    // Run blocking store lookups off the async runtime
    let st = state.clone();
    let page = tokio::task::spawn_blocking(move || {
        let validated = validate(
            st.store.as_ref(),
            st.tokens.as_ref(),
            &req.provider_id,
            &req.limit,
            &req.token,
        )?;
        pagination::page(validated.log, req.cursor.as_deref(), validated.limit)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    debug!("Provider {}: returning {} messages", provider_id, page.len());
    Ok(Json(page))
}

/// POST /publish/{provider_id}: append a message, creating the provider on first use.
pub async fn publish_message(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Json(req): Json<PublishMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.message.is_empty() {
        return Err(ApiError::EmptyMessage);
    }

    let now = chrono::Utc::now().timestamp();
    let message = Message {
        id: Uuid::new_v4().to_string(),
        message: req.message,
        access: req
            .access
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| ACCESS_ANY.to_string()),
        created_at: now,
    };
    let expires_at = state.retention_secs.map(|secs| now.saturating_add(secs));

    let st = state.clone();
    let pid = provider_id.clone();
    let stored = message.clone();
    tokio::task::spawn_blocking(move || st.store.append(&pid, &stored, expires_at))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    info!("Message {} published to provider {}", message.id, provider_id);
    Ok((StatusCode::CREATED, Json(message)))
}
