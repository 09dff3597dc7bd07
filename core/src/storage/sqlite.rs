//! SQLite storage backend.
//!
//! One table, `kv_entry`, keyed by (origin, key). Several origins can share
//! a database file without seeing each other's entries.

use crate::error::{SaveError, SaveResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{check_quota, entry_size, KeyValueStorage};

pub struct SqliteStorage {
    conn:   Connection,
    origin: String,
    quota:  Option<usize>,
}

impl SqliteStorage {
    /// Open (or create) the storage database at `path`.
    pub fn open(path: &str, origin: &str) -> SaveResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; in-memory databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn, origin: origin.to_string(), quota: None })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory(origin: &str) -> SaveResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, origin: origin.to_string(), quota: None })
    }

    /// Limit the total bytes (keys plus values) this origin may hold.
    pub fn with_quota(mut self, bytes: Option<usize>) -> Self {
        self.quota = bytes;
        self
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SaveResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_key_value.sql"))?;
        Ok(())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// When `key` was last written, if it exists.
    pub fn last_updated(&self, key: &str) -> SaveResult<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_entry WHERE origin = ?1 AND key = ?2",
                params![self.origin, key],
                |row| row.get(0),
            )
            .optional()?;
        raw.map(|text| {
            DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| SaveError::Other(anyhow::anyhow!("bad updated_at '{text}': {e}")))
        })
        .transpose()
    }

    /// Number of keys stored under this origin.
    pub fn key_count(&self) -> SaveResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM kv_entry WHERE origin = ?1",
            params![self.origin],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn bytes_in_use_except(&self, key: &str) -> SaveResult<usize> {
        let bytes: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM kv_entry WHERE origin = ?1 AND key <> ?2",
            params![self.origin, key],
            |row| row.get(0),
        )?;
        Ok(bytes.max(0) as usize)
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> SaveResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entry WHERE origin = ?1 AND key = ?2",
                params![self.origin, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> SaveResult<()> {
        if self.quota.is_some() {
            check_quota(self.quota, self.bytes_in_use_except(key)?, entry_size(key, value))?;
        }
        self.conn.execute(
            "INSERT INTO kv_entry (origin, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (origin, key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![self.origin, key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SaveResult<()> {
        self.conn.execute(
            "DELETE FROM kv_entry WHERE origin = ?1 AND key = ?2",
            params![self.origin, key],
        )?;
        Ok(())
    }
}
