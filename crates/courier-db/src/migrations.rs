use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE providers (
                id          TEXT PRIMARY KEY,
                created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            );

            CREATE TABLE messages (
                seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                id          TEXT NOT NULL UNIQUE,
                provider_id TEXT NOT NULL REFERENCES providers(id),
                message     TEXT NOT NULL,
                access      TEXT NOT NULL DEFAULT '*',
                created_at  INTEGER NOT NULL,
                expires_at  INTEGER
            );

            CREATE INDEX idx_messages_provider
                ON messages(provider_id, seq);

            CREATE INDEX idx_messages_expiry
                ON messages(expires_at)
                WHERE expires_at IS NOT NULL;

            CREATE TABLE tokens (
                token_sha256 TEXT PRIMARY KEY,
                created_at   INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            );

            -- Seed the default provider
            INSERT OR IGNORE INTO providers (id) VALUES ('1');

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
