//! SMTP mailer implementation of the `PhotoTransport` seam.

use async_trait::async_trait;
use frame_engine::{Photo, PhotoTransport, TransportError};
use frame_runtime::config::Secrets;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, instrument};

use crate::error::{Result, SmtpMailerError};

/// Subject line the frame displays for incoming photos
const SUBJECT: &str = "New Photo";

/// Fixed body text; the frame only reads the attachment
const BODY_TEXT: &str = "See attached photo.";

/// SMTP connection settings and the frame's inbound address.
#[derive(Clone)]
pub struct MailerConfig {
    /// SMTP relay host name
    pub server: String,

    /// SMTP submission port (implicit TLS)
    pub port: u16,

    /// SMTP username; doubles as the sender address
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Email address the frame polls for new photos
    pub frame_address: String,
}

impl MailerConfig {
    /// Builds a mailer configuration from the loaded secrets.
    pub fn from_secrets(secrets: &Secrets) -> Self {
        Self {
            server: secrets.smtp_server.clone(),
            port: secrets.smtp_port,
            username: secrets.smtp_username.clone(),
            password: secrets.smtp_password.clone(),
            frame_address: secrets.frame_email.clone(),
        }
    }
}

impl std::fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("frame_address", &self.frame_address)
            .finish()
    }
}

/// SMTP implementation of [`PhotoTransport`].
///
/// The underlying SMTP session is a scoped resource owned by this value:
/// it is established lazily on the first delivery, reused across calls for
/// the lifetime of the transport, and torn down when the transport is
/// dropped — including when a fatal error aborts the run mid-iteration.
/// One `deliver` call still sends exactly one photo in one message.
pub struct SmtpPhotoTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    frame_address: Mailbox,
}

impl SmtpPhotoTransport {
    /// Creates a transport from the given configuration.
    ///
    /// Addresses are validated here; the network is not touched until the
    /// first delivery.
    ///
    /// # Errors
    ///
    /// Returns an error when an address cannot be parsed or the relay host
    /// is unusable.
    pub fn new(config: &MailerConfig) -> Result<Self> {
        let sender: Mailbox =
            config
                .username
                .parse()
                .map_err(|e: lettre::address::AddressError| SmtpMailerError::InvalidAddress {
                    address: config.username.clone(),
                    message: e.to_string(),
                })?;

        let frame_address: Mailbox =
            config
                .frame_address
                .parse()
                .map_err(|e: lettre::address::AddressError| SmtpMailerError::InvalidAddress {
                    address: config.frame_address.clone(),
                    message: e.to_string(),
                })?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)
            .map_err(|e| SmtpMailerError::InvalidRelay {
                server: config.server.clone(),
                message: e.to_string(),
            })?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            mailer,
            sender,
            frame_address,
        })
    }

    /// Assembles the single-attachment message for one photo.
    fn build_message(&self, photo: &Photo, payload: Vec<u8>) -> Result<Message> {
        let assembly_error = |message: String| SmtpMailerError::MessageAssembly {
            file_name: photo.file_name.clone(),
            message,
        };

        let content_type = ContentType::parse(photo.category.mime_type())
            .map_err(|e| assembly_error(e.to_string()))?;

        let attachment = Attachment::new(photo.file_name.clone()).body(payload, content_type);

        Message::builder()
            .from(self.sender.clone())
            .to(self.frame_address.clone())
            .subject(SUBJECT)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(BODY_TEXT.to_string()))
                    .singlepart(attachment),
            )
            .map_err(|e| assembly_error(e.to_string()))
    }
}

/// Sorts an SMTP failure into the engine's recoverable categories.
fn classify_smtp_error(error: lettre::transport::smtp::Error) -> TransportError {
    let message = error.to_string();

    if error.is_permanent() {
        let lowered = message.to_ascii_lowercase();
        if lowered.contains("auth") || lowered.contains("credential") {
            TransportError::Auth(message)
        } else {
            TransportError::Rejected(message)
        }
    } else {
        // Transient responses, TLS and connection failures all come back
        // here; the engine defers the photo either way.
        TransportError::Network(message)
    }
}

#[async_trait]
impl PhotoTransport for SmtpPhotoTransport {
    #[instrument(skip(self), fields(file = %photo.file_name))]
    async fn deliver(&self, photo: &Photo) -> std::result::Result<(), TransportError> {
        let payload =
            tokio::fs::read(&photo.path)
                .await
                .map_err(|e| TransportError::Payload {
                    file_name: photo.file_name.clone(),
                    message: e.to_string(),
                })?;

        let message = self.build_message(photo, payload)?;

        match self.mailer.send(message).await {
            Ok(response) => {
                debug!(code = %response.code(), "Frame mailbox accepted message");
                Ok(())
            }
            Err(e) => Err(classify_smtp_error(e)),
        }
    }
}
