//! # framesync workspace facade
//!
//! Re-exports the workspace crates and wires them together for host
//! applications: load secrets, build an [`AppConfig`], and call
//! [`run_sync`] once per invocation (e.g. from a cron job or a thin CLI).
//!
//! ```ignore
//! use framesync_workspace::{run_sync, AppConfig, Secrets};
//!
//! let secrets = Secrets::load("photo_frame_sync_config/secrets.json")?;
//! let config = AppConfig::builder()
//!     .photo_dir("/photos/digital-photo-frame")
//!     .database_path("photo_frame_sync_data/sent_photos.db")
//!     .secrets(secrets)
//!     .build()?;
//!
//! let summary = run_sync(&config).await?;
//! println!(
//!     "sent {} / skipped {} / deferred {:?}",
//!     summary.sent, summary.skipped, summary.deferred
//! );
//! ```

use anyhow::Context;
use std::sync::Arc;

pub use frame_engine::{
    default_extensions, Photo, PhotoCategory, PhotoTransport, SentLedger, SqliteSentLedger,
    SyncConfig, SyncEngine, SyncError, SyncSummary, TransportError,
};
pub use frame_runtime::{
    init_logging, AppConfig, LogFormat, LogLevel, LoggingConfig, Secrets,
};
pub use transport_smtp::{MailerConfig, SmtpPhotoTransport};

/// Runs one sync pass with the SMTP transport.
///
/// Builds the transport from the configured secrets, runs the engine
/// against the configured photo directory and ledger, and returns the run
/// summary. Per-photo delivery failures are reported in the summary; only
/// an unusable ledger or an unreadable photo directory is an error.
pub async fn run_sync(config: &AppConfig) -> anyhow::Result<SyncSummary> {
    let mailer_config = MailerConfig::from_secrets(&config.secrets);
    let transport = Arc::new(
        SmtpPhotoTransport::new(&mailer_config)
            .context("Failed to construct SMTP transport")?,
    );

    let engine = SyncEngine::new(
        SyncConfig::new(&config.photo_dir, &config.database_path),
        transport,
    );

    let summary = engine.run().await.context("Sync run failed")?;

    if !summary.is_complete() {
        tracing::warn!(
            deferred = summary.deferred.len(),
            "Some photos were not delivered; they will be retried next run"
        );
    }

    Ok(summary)
}
