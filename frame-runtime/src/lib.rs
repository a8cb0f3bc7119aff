//! # Frame Sync Runtime
//!
//! Ambient infrastructure shared by the sync engine and its transports:
//! configuration loading, structured logging bootstrap, and the runtime
//! error type.
//!
//! ## Components
//!
//! - **Configuration** (`config`): secrets file loading and the validated
//!   [`AppConfig`] builder
//! - **Logging** (`logging`): `tracing-subscriber` setup with configurable
//!   format and filtering

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, AppConfigBuilder, Secrets};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
