//! Database row types: these map directly to SQLite rows.
//! Distinct from courier-types wire models to keep the DB layer independent.

pub struct MessageRow {
    /// Insertion sequence; breaks `created_at` ties deterministically.
    pub seq: i64,
    pub id: String,
    pub provider_id: String,
    pub message: String,
    pub access: String,
    pub created_at: i64,
    pub expires_at: Option<i64>,
}

pub struct NewMessage<'a> {
    pub id: &'a str,
    pub provider_id: &'a str,
    pub message: &'a str,
    pub access: &'a str,
    pub created_at: i64,
    pub expires_at: Option<i64>,
}
