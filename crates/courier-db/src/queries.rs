use crate::models::{MessageRow, NewMessage};
use crate::Database;
use anyhow::Result;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

impl Database {
    // -- Providers --

    pub fn provider_exists(&self, provider_id: &str) -> Result<bool> {
        self.with_conn(|conn| query_provider_exists(conn, provider_id))
    }

    // -- Messages --

    /// Returns the provider's live log in insertion order, or `None` when the
    /// provider does not exist. Messages with `expires_at < now` are left out
    /// even before the sweep deletes them.
    pub fn get_messages(&self, provider_id: &str, now: i64) -> Result<Option<Vec<MessageRow>>> {
        self.with_conn(|conn| {
            if !query_provider_exists(conn, provider_id)? {
                return Ok(None);
            }
            query_messages(conn, provider_id, now).map(Some)
        })
    }

    /// Append a message, creating its provider on first use.
    pub fn insert_message(&self, msg: &NewMessage<'_>) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR IGNORE INTO providers (id) VALUES (?1)",
                [msg.provider_id],
            )?;
            tx.execute(
                "INSERT INTO messages (id, provider_id, message, access, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    msg.id,
                    msg.provider_id,
                    msg.message,
                    msg.access,
                    msg.created_at,
                    msg.expires_at,
                ],
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Delete every message whose `expires_at` lies strictly before `now`.
    /// Returns the number of rows removed.
    pub fn delete_expired_messages(&self, now: i64) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute(
                "DELETE FROM messages WHERE expires_at IS NOT NULL AND expires_at < ?1",
                [now],
            )?;
            Ok(removed)
        })
    }

    // -- Tokens --

    /// Register a token. Only its SHA-256 digest is persisted.
    pub fn insert_token(&self, token: &str) -> Result<()> {
        let digest = token_digest(token);
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO tokens (token_sha256) VALUES (?1)",
                [&digest],
            )?;
            Ok(())
        })
    }

    pub fn contains_token(&self, token: &str) -> Result<bool> {
        let digest = token_digest(token);
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM tokens WHERE token_sha256 = ?1",
                    [&digest],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    // -- Health --

    pub fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }
}

fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn query_provider_exists(conn: &Connection, provider_id: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM providers WHERE id = ?1",
            [provider_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn query_messages(conn: &Connection, provider_id: &str, now: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT seq, id, provider_id, message, access, created_at, expires_at
         FROM messages
         WHERE provider_id = ?1
           AND (expires_at IS NULL OR expires_at >= ?2)
         ORDER BY seq ASC",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![provider_id, now], |row| {
            Ok(MessageRow {
                seq: row.get(0)?,
                id: row.get(1)?,
                provider_id: row.get(2)?,
                message: row.get(3)?,
                access: row.get(4)?,
                created_at: row.get(5)?,
                expires_at: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
