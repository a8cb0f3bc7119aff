use std::path::PathBuf;
use thiserror::Error;

/// Fatal sync run errors.
///
/// Per-photo delivery failures are not represented here; they are contained
/// within the run and surfaced through the run summary. See
/// [`TransportError`](crate::transport::TransportError).
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sent ledger unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Photo discovery failed for {}: {message}", .path.display())]
    Discovery { path: PathBuf, message: String },

    #[error("Database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
