//! Error types for the SMTP transport

use frame_engine::TransportError;
use thiserror::Error;

/// SMTP transport setup and message assembly errors
#[derive(Error, Debug)]
pub enum SmtpMailerError {
    /// A configured mailbox address could not be parsed
    #[error("Invalid mailbox address {address}: {message}")]
    InvalidAddress { address: String, message: String },

    /// The SMTP relay host could not be resolved into a transport
    #[error("Invalid SMTP relay {server}: {message}")]
    InvalidRelay { server: String, message: String },

    /// The outgoing message could not be assembled
    #[error("Failed to assemble message for {file_name}: {message}")]
    MessageAssembly { file_name: String, message: String },
}

/// Result type for SMTP transport operations
pub type Result<T> = std::result::Result<T, SmtpMailerError>;

impl From<SmtpMailerError> for TransportError {
    fn from(error: SmtpMailerError) -> Self {
        TransportError::Rejected(error.to_string())
    }
}
