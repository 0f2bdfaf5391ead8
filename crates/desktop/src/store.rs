//! Local record store mirroring the session token (single slot).

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tokio::sync::Mutex;

use bizdash_core::{RawToken, SessionRecordId};

use crate::types::{StoreBackend, StoredSessionRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("corrupt session record: {0}")]
    Corrupt(String),
}

/// Single-slot session mirror.
///
/// `put` replaces whatever was there (last write wins); `latest` returns the
/// newest record by id.
#[async_trait]
pub trait RecordStore: Send + Sync + core::fmt::Debug {
    async fn put(&self, record: StoredSessionRecord) -> Result<(), StoreError>;

    async fn latest(&self) -> Result<Option<StoredSessionRecord>, StoreError>;

    /// Delete every record. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), StoreError>;

    fn backend(&self) -> StoreBackend;
}

/// SQLite-backed mirror that survives restarts.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session store directory at {parent:?}"))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open session store at {path:?}"))?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database (tests, throwaway sessions).
    pub async fn open_in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("invalid in-memory sqlite url")?;

        // One connection that never idles out, otherwise the database vanishes.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect_with(options)
            .await
            .context("failed to open in-memory session store")?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_records (
                id        TEXT PRIMARY KEY,
                token     TEXT NOT NULL,
                stored_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create session_records table")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn put(&self, record: StoredSessionRecord) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM session_records")
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO session_records (id, token, stored_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.token.as_str())
        .bind(record.stored_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn latest(&self) -> Result<Option<StoredSessionRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, token, stored_at
            FROM session_records
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let id: String = row.try_get("id")?;
        let token: String = row.try_get("token")?;
        let stored_at: String = row.try_get("stored_at")?;

        let id = SessionRecordId::from_str(&id).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let stored_at = DateTime::parse_from_rfc3339(&stored_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StoreError::Corrupt(format!("stored_at: {e}")))?;

        Ok(Some(StoredSessionRecord {
            id,
            token: RawToken::new(token),
            stored_at,
        }))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM session_records")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }
}

/// Process-lifetime fallback used when persistent storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    slot: Mutex<Option<StoredSessionRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, record: StoredSessionRecord) -> Result<(), StoreError> {
        *self.slot.lock().await = Some(record);
        Ok(())
    }

    async fn latest(&self) -> Result<Option<StoredSessionRecord>, StoreError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().await = None;
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}

/// Open the SQLite mirror, degrading to memory if storage is unavailable.
///
/// `path` defaults to [`session_db_path`].
pub async fn open_record_store(path: Option<PathBuf>) -> Arc<dyn RecordStore> {
    let path = match path.map(Ok).unwrap_or_else(session_db_path) {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!("no persistent session storage, using memory: {err:?}");
            return Arc::new(MemoryRecordStore::new());
        }
    };

    match SqliteRecordStore::open(&path).await {
        Ok(store) => {
            tracing::debug!(path = %path.display(), "session store opened");
            Arc::new(store)
        }
        Err(err) => {
            tracing::warn!("session store unavailable, using memory: {err:?}");
            Arc::new(MemoryRecordStore::new())
        }
    }
}

/// Resolve the default path of the session database:
/// `{app_data_dir}/bizdash/session.db`.
pub fn session_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        }))
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut dir = base;
    dir.push("bizdash");
    dir.push("session.db");

    Ok(dir)
}
