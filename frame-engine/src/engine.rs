//! # Sync Engine
//!
//! Orchestrates one idempotent sync run.
//!
//! ## Per-photo state machine
//!
//! ```text
//! Discovered --(already in ledger)--> Skipped
//! Discovered --(not in ledger)-----> Attempting
//! Attempting --(transport success)-> Recorded   (ledger updated)
//! Attempting --(transport failure)-> Deferred   (ledger untouched; retried next run)
//! ```
//!
//! The ledger is committed only after the transport confirms delivery, so a
//! crash between delivery and commit re-delivers at most that one photo on
//! the next run, and a recorded photo is never delivered twice.
//!
//! ## Failure model
//!
//! Only two conditions abort a run: the ledger cannot be opened
//! ([`SyncError::StoreUnavailable`]) or the source directory cannot be read
//! ([`SyncError::Discovery`]). A per-photo transport failure is logged with
//! the photo's identity, the photo is deferred, and iteration continues.
//! Partial batches are normal, not an error state.
//!
//! Execution is strictly sequential: one photo in flight at a time, one
//! ledger handle per run, closed on every exit path.

use crate::discovery::discover;
use crate::error::Result;
use crate::ledger::{SentLedger, SqliteSentLedger};
use crate::transport::PhotoTransport;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default extension groups, in delivery order.
pub fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "heic"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Sync engine configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Directory containing the photos to sync
    pub photo_dir: PathBuf,

    /// Path to the SQLite ledger database
    pub ledger_path: PathBuf,

    /// Extension groups to discover, in order. Defines the category order
    /// of the delivery sequence.
    pub extensions: Vec<String>,
}

impl SyncConfig {
    /// Creates a configuration with the default extension order.
    pub fn new(photo_dir: impl Into<PathBuf>, ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            photo_dir: photo_dir.into(),
            ledger_path: ledger_path.into(),
            extensions: default_extensions(),
        }
    }
}

/// Outcome counts for one sync run.
///
/// `deferred` carries the identities that failed delivery this run so the
/// caller can report them; those photos stay out of the ledger and are
/// retried on the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Photos delivered and recorded this run
    pub sent: u64,

    /// Photos already recorded by a previous run
    pub skipped: u64,

    /// File names whose delivery failed this run
    pub deferred: Vec<String>,
}

impl SyncSummary {
    /// True when every discovered photo is now recorded.
    pub fn is_complete(&self) -> bool {
        self.deferred.is_empty()
    }
}

/// Orchestrates discovery, dedup filtering, and delivery for one source
/// directory and one destination.
pub struct SyncEngine {
    config: SyncConfig,
    transport: Arc<dyn PhotoTransport>,
}

impl SyncEngine {
    /// Creates a new sync engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Source directory, ledger path, and extension order
    /// * `transport` - Delivery capability for one photo at a time
    pub fn new(config: SyncConfig, transport: Arc<dyn PhotoTransport>) -> Self {
        Self { config, transport }
    }

    /// Runs one sync pass: opens the ledger, discovers photos, delivers the
    /// ones not yet recorded, and returns the run summary.
    ///
    /// # Errors
    ///
    /// Returns an error only for the fatal conditions (ledger unavailable,
    /// source directory unreadable). Per-photo failures are reported in the
    /// summary instead.
    #[instrument(skip(self), fields(photo_dir = %self.config.photo_dir.display()))]
    pub async fn run(&self) -> Result<SyncSummary> {
        let ledger = SqliteSentLedger::open(&self.config.ledger_path).await?;

        // The ledger handle is released on every exit path, fatal or not.
        let result = self.run_with_ledger(&ledger).await;
        ledger.close().await;
        result
    }

    /// Runs one sync pass against an already-open ledger.
    ///
    /// The caller keeps ownership of the ledger and is responsible for
    /// closing it.
    pub async fn run_with_ledger(&self, ledger: &dyn SentLedger) -> Result<SyncSummary> {
        let photos = discover(&self.config.photo_dir, &self.config.extensions).await?;
        info!(count = photos.len(), "Discovered candidate photos");

        let mut summary = SyncSummary::default();

        for photo in &photos {
            if ledger.contains(&photo.file_name).await? {
                debug!(file = %photo.file_name, "Already sent, skipping");
                summary.skipped += 1;
                continue;
            }

            match self.transport.deliver(photo).await {
                Ok(()) => {
                    ledger.record(&photo.file_name).await?;
                    summary.sent += 1;
                    info!(file = %photo.file_name, "Sent");
                }
                Err(e) => {
                    warn!(
                        file = %photo.file_name,
                        error = %e,
                        "Delivery failed, deferring to next run"
                    );
                    summary.deferred.push(photo.file_name.clone());
                }
            }
        }

        info!(
            sent = summary.sent,
            skipped = summary.skipped,
            deferred = summary.deferred.len(),
            "Sync run complete"
        );

        Ok(summary)
    }
}
