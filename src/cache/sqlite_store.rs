//! SQLite-backed record cache with a time-to-live.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::CacheError;
use crate::record::{LookupKey, PokeRecord};

/// Persistent cache of assembled records, one row per pokemon name.
///
/// Rows are never deleted. A row older than the TTL reads as a miss and is
/// replaced by the next write for that name.
pub struct RecordCache {
    conn: Mutex<Connection>,
    ttl: Duration,
}

impl std::fmt::Debug for RecordCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordCache").field("ttl", &self.ttl).finish()
    }
}

impl RecordCache {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: impl AsRef<Path>, ttl: Duration) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let cache = Self::with_connection(Connection::open(path)?, ttl)?;
        log::info!("record cache opened at {}", path.display());
        Ok(cache)
    }

    /// A cache that lives only as long as this value.
    pub fn in_memory(ttl: Duration) -> Result<Self, CacheError> {
        Self::with_connection(Connection::open_in_memory()?, ttl)
    }

    fn with_connection(conn: Connection, ttl: Duration) -> Result<Self, CacheError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pokemon (
                id INTEGER,
                name TEXT,
                data BLOB,
                updated_at TEXT,
                PRIMARY KEY(name)
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            ttl,
        })
    }

    /// Upsert `record`, stamped with the current time.
    pub fn put(&self, record: &PokeRecord) -> Result<(), CacheError> {
        self.put_at(record, Utc::now())
    }

    /// Upsert `record` with an explicit `updated_at`.
    pub fn put_at(&self, record: &PokeRecord, at: DateTime<Utc>) -> Result<(), CacheError> {
        let data = serde_json::to_vec(record)?;
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO pokemon (id, name, data, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![record.id, record.name, data, at.to_rfc3339()],
        )?;
        log::debug!("cached pokemon {} ({})", record.name, record.id);
        Ok(())
    }

    /// Look up a fresh record. Absent and expired rows both return `Ok(None)`.
    pub fn get(&self, key: &LookupKey) -> Result<Option<PokeRecord>, CacheError> {
        self.get_at(key, Utc::now())
    }

    /// Like [`get`](Self::get), judging freshness against `now`.
    pub fn get_at(
        &self,
        key: &LookupKey,
        now: DateTime<Utc>,
    ) -> Result<Option<PokeRecord>, CacheError> {
        let row = {
            let conn = self.conn.lock();
            let read = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(Vec<u8>, String)> {
                Ok((row.get(0)?, row.get(1)?))
            };
            match key {
                LookupKey::Id(id) => conn
                    .query_row(
                        "SELECT data, updated_at FROM pokemon WHERE id = ?1 LIMIT 1",
                        params![id],
                        read,
                    )
                    .optional()?,
                LookupKey::Name(name) => conn
                    .query_row(
                        "SELECT data, updated_at FROM pokemon WHERE name = ?1",
                        params![name],
                        read,
                    )
                    .optional()?,
            }
        };

        let Some((data, updated_at)) = row else {
            return Ok(None);
        };

        let updated_at = DateTime::parse_from_rfc3339(&updated_at)?.with_timezone(&Utc);
        let age = (now - updated_at).to_std().unwrap_or_default();
        if age >= self.ttl {
            log::debug!("cache entry for {} expired ({:?} old)", key, age);
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&data)?))
    }

    /// [`get`](Self::get) on the blocking pool.
    pub async fn aget(self: &Arc<Self>, key: LookupKey) -> Result<Option<PokeRecord>, CacheError> {
        let cache = Arc::clone(self);
        tokio::task::spawn_blocking(move || cache.get(&key)).await?
    }

    /// Write `record` in a detached blocking task. Failures are logged only.
    pub fn spawn_put(self: &Arc<Self>, record: PokeRecord) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = cache.put(&record) {
                log::error!("can't write pokemon {} ({}): {}", record.name, record.id, e);
            }
        })
    }

    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<(), CacheError> {
        self.conn.lock().execute_batch(sql)?;
        Ok(())
    }
}
