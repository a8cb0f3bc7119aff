//! # Photo Frame Sync Engine
//!
//! Idempotent batch delivery of local photos to a digital photo frame.
//!
//! ## Overview
//!
//! This crate manages one sync run end to end:
//! - Discovering candidate photos in a source directory, grouped by
//!   extension and sorted by file name (`discovery`)
//! - Filtering out photos already delivered, using a durable SQLite ledger
//!   keyed by file name (`ledger`)
//! - Delivering new photos through a [`PhotoTransport`] implementation
//!   (`transport`)
//! - Recording each delivery in the ledger only after the transport
//!   confirms success (`engine`)
//!
//! A failed delivery never blocks the rest of the batch: the photo is left
//! out of the ledger and picked up again on the next run.
//!
//! ## Known limitation
//!
//! The file name is the idempotency key. Two photos with the same name but
//! different content are indistinguishable to the ledger; replacing a
//! photo's bytes without renaming it will not trigger redelivery.
//!
//! ## Components
//!
//! - **Photo Model** (`photo`): photo identity and extension-derived category
//! - **Sent Ledger** (`ledger`): durable record of delivered file names
//! - **Discovery** (`discovery`): deterministic candidate enumeration
//! - **Transport Seam** (`transport`): delivery capability consumed by the engine
//! - **Sync Engine** (`engine`): per-photo state machine and run summary

pub mod discovery;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod photo;
pub mod transport;

pub use discovery::discover;
pub use engine::{default_extensions, SyncConfig, SyncEngine, SyncSummary};
pub use error::{Result, SyncError};
pub use ledger::{SentLedger, SqliteSentLedger};
pub use photo::{Photo, PhotoCategory};
pub use transport::{PhotoTransport, TransportError};
