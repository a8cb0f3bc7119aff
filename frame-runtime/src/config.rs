//! # Configuration Module
//!
//! Provides configuration for the photo frame synchronizer.
//!
//! ## Overview
//!
//! Two pieces make up a complete configuration:
//!
//! - [`Secrets`]: SMTP credentials and the frame's inbound email address,
//!   loaded from a JSON file kept outside the repository.
//! - [`AppConfig`]: the validated run configuration (photo directory, ledger
//!   database path, secrets), constructed once through a builder and passed
//!   explicitly into the engine and transport constructors. There is no
//!   ambient or global configuration state.
//!
//! ## Usage
//!
//! ```no_run
//! use frame_runtime::config::{AppConfig, Secrets};
//!
//! # fn main() -> frame_runtime::Result<()> {
//! let secrets = Secrets::load("photo_frame_sync_config/secrets.json")?;
//!
//! let config = AppConfig::builder()
//!     .photo_dir("/photos/digital-photo-frame")
//!     .database_path("photo_frame_sync_data/sent_photos.db")
//!     .secrets(secrets)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default SMTP submission port (implicit TLS).
pub const DEFAULT_SMTP_PORT: u16 = 465;

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

/// SMTP credentials and the destination frame address.
///
/// Loaded from a JSON secrets file of the form:
///
/// ```json
/// {
///   "smtp_server": "smtp.example.com",
///   "smtp_port": 465,
///   "smtp_username": "sender@example.com",
///   "smtp_password": "app-password",
///   "frame_email": "my-frame@frame-vendor.com"
/// }
/// ```
///
/// `smtp_port` is optional and defaults to 465.
#[derive(Clone, Deserialize)]
pub struct Secrets {
    /// SMTP relay host name
    pub smtp_server: String,

    /// SMTP submission port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username; also used as the message sender address
    pub smtp_username: String,

    /// SMTP password (for Gmail this must be an app password)
    pub smtp_password: String,

    /// Email address the frame polls for new photos
    pub frame_email: String,
}

impl Secrets {
    /// Loads secrets from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a config error when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read secrets file {}: {}", path.display(), e))
        })?;

        let secrets: Secrets = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!("Failed to parse secrets file {}: {}", path.display(), e))
        })?;

        secrets.validate()?;
        Ok(secrets)
    }

    /// Validates that no credential field is empty.
    pub fn validate(&self) -> Result<()> {
        if self.smtp_server.is_empty() {
            return Err(Error::Config("SMTP server cannot be empty".to_string()));
        }

        if self.smtp_port == 0 {
            return Err(Error::Config("SMTP port cannot be 0".to_string()));
        }

        if self.smtp_username.is_empty() {
            return Err(Error::Config("SMTP username cannot be empty".to_string()));
        }

        if self.smtp_password.is_empty() {
            return Err(Error::Config("SMTP password cannot be empty".to_string()));
        }

        if self.frame_email.is_empty() {
            return Err(Error::Config(
                "Frame email address cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// The password never appears in Debug output or logs.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<redacted>")
            .field("frame_email", &self.frame_email)
            .finish()
    }
}

/// Application configuration for one synchronizer instance.
///
/// Use [`AppConfigBuilder`] to construct instances; `build()` performs
/// fail-fast validation with actionable error messages.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory containing the photos to sync
    pub photo_dir: PathBuf,

    /// Path to the SQLite ledger tracking sent photos
    pub database_path: PathBuf,

    /// SMTP credentials and destination frame address
    pub secrets: Secrets,
}

impl AppConfig {
    /// Creates a new builder for constructing an `AppConfig`.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.photo_dir.as_os_str().is_empty() {
            return Err(Error::Config("Photo directory cannot be empty".to_string()));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        self.secrets.validate()
    }
}

/// Builder for [`AppConfig`] instances.
#[derive(Default)]
pub struct AppConfigBuilder {
    photo_dir: Option<PathBuf>,
    database_path: Option<PathBuf>,
    secrets: Option<Secrets>,
}

impl AppConfigBuilder {
    /// Sets the directory containing the photos to sync.
    pub fn photo_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.photo_dir = Some(path.into());
        self
    }

    /// Sets the SQLite ledger database path.
    pub fn database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Sets the SMTP secrets.
    pub fn secrets(mut self, secrets: Secrets) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Builds the final `AppConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns a config error if a required field is missing or a value
    /// fails validation.
    pub fn build(self) -> Result<AppConfig> {
        let photo_dir = self.photo_dir.ok_or_else(|| {
            Error::Config("Photo directory is required. Use .photo_dir() to set it.".to_string())
        })?;

        let database_path = self.database_path.ok_or_else(|| {
            Error::Config("Database path is required. Use .database_path() to set it.".to_string())
        })?;

        let secrets = self.secrets.ok_or_else(|| {
            Error::Config("Secrets are required. Use .secrets() to set them.".to_string())
        })?;

        let config = AppConfig {
            photo_dir,
            database_path,
            secrets,
        };

        config.validate()?;

        Ok(config)
    }
}
