//! Database operations: schema, open, and the read-only history / vocabulary stores.

mod connection;
mod stores;

pub use connection::{open_db, open_db_in_memory, open_db_or_detect_encrypted};
pub use stores::SqliteStore;

/// Ingested recipes keyed by platform video id, and the dish-type vocabulary.
/// Owned by the ingestion side; this crate only reads it. Applied here to in-memory test databases.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    youtube_id TEXT PRIMARY KEY,
    title TEXT,
    ingested_at INTEGER
);

CREATE TABLE IF NOT EXISTS dish_types (
    name TEXT PRIMARY KEY
);
"#;

pub(crate) const SELECT_KNOWN_IDS_SQL: &str = "SELECT youtube_id FROM recipes";
pub(crate) const SELECT_TERMS_SQL: &str = "SELECT name FROM dish_types ORDER BY name";
