//! Transport seam: the delivery capability consumed by the sync engine.

use crate::photo::Photo;
use async_trait::async_trait;
use thiserror::Error;

/// Per-photo delivery failure.
///
/// Every variant is recoverable at the engine level: the photo is deferred
/// to the next run and iteration continues. Transport errors never abort a
/// batch.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The destination refused our credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection-level failure (DNS, TLS, timeouts, dropped sessions)
    #[error("Network error: {0}")]
    Network(String),

    /// The destination accepted the session but rejected the message
    #[error("Destination rejected the message: {0}")]
    Rejected(String),

    /// The photo's bytes could not be read from the source directory
    #[error("Cannot read photo {file_name}: {message}")]
    Payload { file_name: String, message: String },
}

/// Delivers one photo to the frame.
///
/// One call delivers one photo. Implementations may keep a session alive
/// across calls as a scoped resource, but must not batch multiple photos
/// into one delivery.
#[async_trait]
pub trait PhotoTransport: Send + Sync {
    /// Delivers `photo` to the fixed destination.
    ///
    /// Returning `Ok(())` means the payload was fully sent and acknowledged.
    /// Any error means the photo was not delivered; there is no partial
    /// success state.
    async fn deliver(&self, photo: &Photo) -> std::result::Result<(), TransportError>;
}
