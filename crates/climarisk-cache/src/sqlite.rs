//! SQLite-backed TTL cache.
//!
//! Every process that opens the same database file shares entries, which
//! makes this the multi-instance backend. WAL mode lets readers proceed
//! while one writer holds the lock. Hit/miss counters are per process.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use climarisk_core::errors::ClimaResult;
use climarisk_core::models::CacheStats;
use climarisk_core::traits::ICacheBackend;

use crate::backend_err;

const BACKEND: &str = "sqlite";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS cache_entries (
        key        TEXT PRIMARY KEY,
        value      TEXT NOT NULL,
        source     TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        expires_at INTEGER NOT NULL,
        hit_count  INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_cache_entries_expires ON cache_entries(expires_at);
";

fn sql_err(e: rusqlite::Error) -> climarisk_core::ClimaError {
    backend_err(BACKEND, e)
}

/// Apply WAL and busy-timeout pragmas.
fn apply_pragmas(conn: &Connection) -> ClimaResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(sql_err)
}

/// Shared TTL cache stored in a SQLite table.
pub struct SqliteCache {
    conn: Mutex<Connection>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SqliteCache {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: &Path, default_ttl_secs: u64) -> ClimaResult<Self> {
        let conn = Connection::open(path).map_err(sql_err)?;
        Self::init(conn, default_ttl_secs)
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory(default_ttl_secs: u64) -> ClimaResult<Self> {
        let conn = Connection::open_in_memory().map_err(sql_err)?;
        Self::init(conn, default_ttl_secs)
    }

    fn init(conn: Connection, default_ttl_secs: u64) -> ClimaResult<Self> {
        apply_pragmas(&conn)?;
        conn.execute_batch(SCHEMA).map_err(sql_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
            default_ttl: Duration::from_secs(default_ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves no partial state in SQLite; keep going.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stored hit count for `key`, expired or not.
    pub fn hit_count(&self, key: &str) -> ClimaResult<Option<u64>> {
        let conn = self.lock();
        conn.query_row(
            "SELECT hit_count FROM cache_entries WHERE key = ?1",
            params![key],
            |row| row.get::<_, i64>(0),
        )
        .optional()
        .map(|v| v.map(|n| n as u64))
        .map_err(sql_err)
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl ICacheBackend for SqliteCache {
    fn get(&self, key: &str) -> ClimaResult<Option<Value>> {
        let now = now_millis();
        let conn = self.lock();
        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT value, expires_at FROM cache_entries WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(sql_err)?;

        match row {
            Some((raw, expires_at)) if now <= expires_at => {
                conn.execute(
                    "UPDATE cache_entries SET hit_count = hit_count + 1 WHERE key = ?1",
                    params![key],
                )
                .map_err(sql_err)?;
                self.hits.fetch_add(1, Ordering::Relaxed);
                let value = serde_json::from_str(&raw).map_err(|e| {
                    climarisk_core::errors::CacheError::Serialization {
                        key: key.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(Some(value))
            }
            Some(_) => {
                conn.execute(
                    "DELETE FROM cache_entries WHERE key = ?1 AND expires_at < ?2",
                    params![key, now],
                )
                .map_err(sql_err)?;
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key, backend = BACKEND, "cache entry expired on read");
                Ok(None)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>, source: &str) -> ClimaResult<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let created_at = now_millis();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at = created_at.saturating_add(ttl_ms);
        let raw = serde_json::to_string(&value)?;
        self.lock()
            .execute(
                "INSERT OR REPLACE INTO cache_entries
                     (key, value, source, created_at, expires_at, hit_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0)",
                params![key, raw, source, created_at, expires_at],
            )
            .map_err(sql_err)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> ClimaResult<bool> {
        let changed = self
            .lock()
            .execute("DELETE FROM cache_entries WHERE key = ?1", params![key])
            .map_err(sql_err)?;
        Ok(changed > 0)
    }

    fn clear(&self) -> ClimaResult<usize> {
        self.lock()
            .execute("DELETE FROM cache_entries", [])
            .map_err(sql_err)
    }

    fn cleanup_expired(&self) -> ClimaResult<usize> {
        self.lock()
            .execute(
                "DELETE FROM cache_entries WHERE expires_at < ?1",
                params![now_millis()],
            )
            .map_err(sql_err)
    }

    fn stats(&self) -> ClimaResult<CacheStats> {
        let entries: i64 = self
            .lock()
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |row| row.get(0))
            .map_err(sql_err)?;
        Ok(CacheStats::new(
            BACKEND,
            entries as usize,
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        ))
    }

    fn name(&self) -> &str {
        BACKEND
    }
}
