use serde::{Deserialize, Serialize};

/// Visibility tag carried by every message. Only the wildcard is issued today.
pub const ACCESS_ANY: &str = "*";

/// A message as stored in a provider's log and returned to pollers.
///
/// Messages are immutable once stored. `created_at` (unix seconds) is the
/// only ordering key exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub message: String,
    pub access: String,
    pub created_at: i64,
}
