//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Open file or in-memory databases for the key-value adapter.
//! - Configure connection pragmas and apply schema migrations before use.
//!
//! # Invariants
//! - Returned adapters have migrations fully applied.
//! - `set` is an upsert; the last write for a key wins.

use super::migrations::apply_migrations;
use super::{PersistenceAdapter, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Durable key-value adapter over a single SQLite table.
///
/// This is the device-local storage backend the mobile shell hands to the
/// task store; one adapter instance owns one connection.
pub struct SqliteKeyValueStorage {
    conn: Connection,
}

impl SqliteKeyValueStorage {
    /// Opens a database file and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `storage_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=storage_open module=storage status=start mode=file");

        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=storage_open module=storage status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        Self::bootstrap(conn, "file", started_at)
    }

    /// Opens an in-memory database and applies all pending migrations.
    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=storage_open module=storage status=start mode=memory");

        let conn = match Connection::open_in_memory() {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=storage_open module=storage status=error mode=memory duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        Self::bootstrap(conn, "memory", started_at)
    }

    fn bootstrap(mut conn: Connection, mode: &str, started_at: Instant) -> StorageResult<Self> {
        let result = (|| -> StorageResult<()> {
            conn.busy_timeout(Duration::from_secs(5))?;
            apply_migrations(&mut conn)?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                info!(
                    "event=storage_open module=storage status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=storage_open module=storage status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl PersistenceAdapter for SqliteKeyValueStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
