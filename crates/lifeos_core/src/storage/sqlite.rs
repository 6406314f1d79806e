//! SQLite-backed key-value adapter.
//!
//! # Invariants
//! - Values live in the `kv_store` table created by migration 1.
//! - `set` is an upsert; `updated_at` tracks the last write in epoch ms.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over a migrated SQLite connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `UnsupportedSchemaVersion` when the schema is newer than this build.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let latest = latest_version();
        if version < latest {
            return Err(StorageError::UninitializedConnection {
                expected_version: latest,
                actual_version: version,
            });
        }
        if version > latest {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: version,
                latest_supported: latest,
            }
            .into());
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
