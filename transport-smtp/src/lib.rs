//! # SMTP Photo Transport
//!
//! Implements the engine's `PhotoTransport` seam over authenticated SMTP.
//!
//! ## Overview
//!
//! Photo frames such as the Pix-Star poll a dedicated mailbox for new
//! photos; delivering a photo means emailing it to the frame's address as a
//! single attachment. This crate provides:
//! - An SMTPS (implicit TLS) session built from [`MailerConfig`]
//! - One message per photo: fixed subject and body, one attachment, MIME
//!   type derived from the photo's category
//! - Classification of SMTP failures into the engine's recoverable
//!   `TransportError` variants

pub mod error;
pub mod mailer;

pub use error::{Result, SmtpMailerError};
pub use mailer::{MailerConfig, SmtpPhotoTransport};
