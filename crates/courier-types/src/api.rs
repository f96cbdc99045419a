use serde::{Deserialize, Serialize};

// -- Publishing --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishMessageRequest {
    pub message: String,
    /// Defaults to the wildcard tag when omitted.
    pub access: Option<String>,
}

// -- Errors --

/// Body of every 4xx response: a human-readable detail string.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
