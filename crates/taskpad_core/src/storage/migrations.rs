//! Schema setup for the key-value database.
//!
//! # Responsibility
//! - Bring a freshly opened connection up to the current schema.
//!
//! # Invariants
//! - The applied schema version is mirrored to `PRAGMA user_version`.
//! - A database written by a newer binary is rejected, never downgraded.

use super::{StorageError, StorageResult};
use rusqlite::Connection;

/// Versioned schema steps, applied in order on first open.
const SCHEMA: &[(u32, &str)] = &[(1, include_str!("migrations/0001_init.sql"))];

/// Returns the schema version this binary writes.
pub fn latest_version() -> u32 {
    SCHEMA.last().map_or(0, |(version, _)| *version)
}

/// Brings the connection's schema up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let applied: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if applied > latest_version() {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: applied,
            latest_supported: latest_version(),
        });
    }

    let pending: Vec<_> = SCHEMA
        .iter()
        .copied()
        .filter(|(version, _)| *version > applied)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in pending {
        tx.execute_batch(sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))?;
    }
    tx.commit()?;

    Ok(())
}
