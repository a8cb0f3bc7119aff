//! # Sent Photo Ledger
//!
//! Durable record of photos already delivered to the frame.
//!
//! ## Overview
//!
//! The ledger is a single SQLite table keyed by file name:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS sent_photos (
//!     filename TEXT PRIMARY KEY
//! )
//! ```
//!
//! Presence of a file name means the photo was delivered at least once.
//! Absence means delivery has not been confirmed, covering both "never
//! attempted" and "attempted and failed". Entries are never removed; the
//! ledger grows monotonically and persists indefinitely across runs.
//!
//! The engine is the only writer, and it records a file name only after the
//! transport confirms delivery. One ledger handle is opened per run and
//! closed when the run ends.

use crate::error::{Result, SyncError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, warn};

/// Durable set of delivered photo file names.
#[async_trait]
pub trait SentLedger: Send + Sync {
    /// Returns true iff `file_name` is recorded as delivered.
    async fn contains(&self, file_name: &str) -> Result<bool>;

    /// Records `file_name` as delivered.
    ///
    /// Idempotent: recording an already-present file name is a no-op, not
    /// an error.
    async fn record(&self, file_name: &str) -> Result<()>;

    /// Returns every recorded file name.
    ///
    /// Rows that cannot be decoded are skipped with a warning rather than
    /// failing the whole scan.
    async fn sent_file_names(&self) -> Result<Vec<String>>;

    /// Releases the underlying handle. All prior `record` calls are durable
    /// (visible to a fresh open) before this returns.
    async fn close(&self);
}

/// SQLite implementation of [`SentLedger`].
pub struct SqliteSentLedger {
    pool: SqlitePool,
}

impl SqliteSentLedger {
    /// Wraps an existing pool. The schema must already exist; see
    /// [`SqliteSentLedger::open`].
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if absent) the ledger database at `path`.
    ///
    /// Parent directories are created as needed and the schema is
    /// initialized on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::StoreUnavailable`] when the location cannot be
    /// created or accessed. This is fatal for the run.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SyncError::StoreUnavailable(format!(
                        "Cannot create ledger directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        // Single connection: the ledger has exactly one reader/writer per run.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                SyncError::StoreUnavailable(format!(
                    "Cannot open ledger at {}: {}",
                    path.display(),
                    e
                ))
            })?;

        Self::init_schema(&pool).await?;

        debug!(path = %path.display(), "Opened sent ledger");
        Ok(Self { pool })
    }

    /// Creates the `sent_photos` table if it does not exist.
    pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sent_photos (
                filename TEXT PRIMARY KEY
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| SyncError::StoreUnavailable(format!("Cannot initialize schema: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl SentLedger for SqliteSentLedger {
    async fn contains(&self, file_name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM sent_photos WHERE filename = ?")
            .bind(file_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SyncError::Database(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn record(&self, file_name: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sent_photos (filename) VALUES (?)
            ON CONFLICT(filename) DO NOTHING
            "#,
        )
        .bind(file_name)
        .execute(&self.pool)
        .await
        .map_err(|e| SyncError::Database(e.to_string()))?;

        Ok(())
    }

    async fn sent_file_names(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT filename FROM sent_photos ORDER BY filename")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SyncError::Database(e.to_string()))?;

        // Unreadable rows are skipped, not fatal.
        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            match row.try_get::<String, _>(0) {
                Ok(name) => names.push(name),
                Err(e) => warn!("Skipping malformed ledger row: {}", e),
            }
        }

        Ok(names)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
