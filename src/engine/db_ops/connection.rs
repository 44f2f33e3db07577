//! Open the recipe database (plain or SQLCipher). Store connections are read-only: the
//! ingestion side owns the file, its schema and its journal mode.

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::utils::get_passphrase;

use super::SCHEMA;

fn open_read_only(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("open database {} (read-only)", path.display()))
}

/// True when the connection can read the catalog (wrong key or a non-database file cannot).
fn is_readable(conn: &Connection) -> bool {
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))
        .is_ok()
}

/// Open an existing database read-only. Never creates the file or touches its schema.
/// If `passphrase` is Some, set SQLCipher PRAGMA key before any other operations.
pub fn open_db(path: &Path, passphrase: Option<&str>) -> Result<Connection> {
    let conn = open_read_only(path)?;

    if let Some(key) = passphrase {
        conn.pragma_update(None, "key", key)
            .context("set SQLCipher key")?;
    }

    anyhow::ensure!(
        is_readable(&conn),
        "cannot read {} (wrong passphrase or not a database)",
        path.display()
    );
    Ok(conn)
}

/// Open an existing database read-only, detecting encryption: try without key first; if that
/// read fails, load the passphrase (env → .env in `dir` → prompt) and reopen with it.
/// A missing file is an error; nothing is created.
pub fn open_db_or_detect_encrypted(path: &Path, dir: &Path) -> Result<Connection> {
    let conn = open_read_only(path)?;
    if is_readable(&conn) {
        return Ok(conn);
    }
    drop(conn);
    let pass = get_passphrase(dir)?;
    open_db(path, Some(pass.as_str()))
}

/// In-memory database with the ingestion schema (tests).
pub fn open_db_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory database")?;
    conn.execute_batch(SCHEMA).context("create schema")?;
    Ok(conn)
}
