//! Narrow interfaces the request path consumes, plus their SQLite-backed
//! implementations.

use anyhow::Result;

use courier_db::Database;
use courier_db::models::{MessageRow, NewMessage};
use courier_types::Message;

/// Per-provider message logs.
pub trait MessageStore: Send + Sync {
    /// The provider's live log in insertion order. `None` means the provider
    /// does not exist; an existing provider with no messages yields `Some(vec![])`.
    fn get_log(&self, provider_id: &str) -> Result<Option<Vec<Message>>>;

    /// Append a message to a provider's log, creating the provider if needed.
    fn append(&self, provider_id: &str, message: &Message, expires_at: Option<i64>) -> Result<()>;

    fn ping(&self) -> Result<()>;
}

/// The set of tokens allowed to read and publish.
pub trait TokenRegistry: Send + Sync {
    fn contains(&self, token: &str) -> Result<bool>;
}

impl MessageStore for Database {
    fn get_log(&self, provider_id: &str) -> Result<Option<Vec<Message>>> {
        let rows = self.get_messages(provider_id, chrono::Utc::now().timestamp())?;
        Ok(rows.map(|rows| rows.into_iter().map(row_to_message).collect()))
    }

    fn append(&self, provider_id: &str, message: &Message, expires_at: Option<i64>) -> Result<()> {
        self.insert_message(&NewMessage {
            id: &message.id,
            provider_id,
            message: &message.message,
            access: &message.access,
            created_at: message.created_at,
            expires_at,
        })
    }

    fn ping(&self) -> Result<()> {
        Database::ping(self)
    }
}

impl TokenRegistry for Database {
    fn contains(&self, token: &str) -> Result<bool> {
        self.contains_token(token)
    }
}

fn row_to_message(row: MessageRow) -> Message {
    Message {
        id: row.id,
        message: row.message,
        access: row.access,
        created_at: row.created_at,
    }
}
