use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::pipeline::sources::{HistoryStore, VocabularyStore};

use super::{SELECT_KNOWN_IDS_SQL, SELECT_TERMS_SQL};

/// History and vocabulary reads over one SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn column_strings(&self, sql: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .with_context(|| format!("prepare `{sql}`"))?;
        let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;
        let mut out = Vec::new();
        for row in rows {
            if let Some(s) = row.context("read row")? {
                out.push(s);
            }
        }
        Ok(out)
    }
}

impl HistoryStore for SqliteStore {
    fn list_known_ids(&self) -> Result<Vec<String>> {
        self.column_strings(SELECT_KNOWN_IDS_SQL)
    }
}

impl VocabularyStore for SqliteStore {
    fn list_terms(&self) -> Result<Vec<String>> {
        self.column_strings(SELECT_TERMS_SQL)
    }
}
