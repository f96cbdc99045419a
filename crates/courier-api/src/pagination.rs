//! Cursor-based windowing over a provider's log.
//!
//! The cursor is the id of the last message the client consumed. Windows are
//! cursor-inclusive: the page starts *at* the cursor message, so a client that
//! resubmits the same cursor sees that message again until it advances.

use courier_types::Message;

use crate::error::ApiError;

/// Return the next window of at most `limit` messages.
///
/// `log` may arrive in any order; it is stably sorted by `created_at`, so
/// messages with equal timestamps keep their insertion order. An empty log
/// or empty window yields [`ApiError::NoMessages`]; a cursor that names no
/// message in the log yields [`ApiError::UnknownCursor`].
pub fn page(
    mut log: Vec<Message>,
    cursor: Option<&str>,
    limit: usize,
) -> Result<Vec<Message>, ApiError> {
    if log.is_empty() {
        return Err(ApiError::NoMessages);
    }

    log.sort_by_key(|m| m.created_at);

    let offset = match cursor {
        None => 0,
        Some(id) => log
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ApiError::UnknownCursor(id.to_string()))?,
    };

    let end = offset.saturating_add(limit).min(log.len());
    if offset >= end {
        return Err(ApiError::NoMessages);
    }

    log.truncate(end);
    Ok(log.split_off(offset))
}
