//! Integration tests for the full sync flow
//!
//! These tests drive `SyncEngine::run` end to end with a real on-disk
//! ledger and a scripted transport, verifying:
//! - Idempotence across whole runs (second run delivers nothing)
//! - Failure isolation and redelivery of deferred photos
//! - Ledger durability across process-restart boundaries (close/reopen)

use async_trait::async_trait;
use frame_engine::{
    Photo, PhotoTransport, SqliteSentLedger, SyncConfig, SyncEngine, SentLedger, TransportError,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ============================================================================
// Scripted Transport
// ============================================================================

/// Transport that records every delivery and fails the configured names.
struct ScriptedTransport {
    delivered: Mutex<Vec<String>>,
    failing: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
        }
    }

    fn fail_for(&self, names: &[&str]) {
        *self.failing.lock().unwrap() = names.iter().map(|s| s.to_string()).collect();
    }

    fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoTransport for ScriptedTransport {
    async fn deliver(&self, photo: &Photo) -> Result<(), TransportError> {
        if self.failing.lock().unwrap().contains(&photo.file_name) {
            return Err(TransportError::Rejected(format!(
                "mailbox refused {}",
                photo.file_name
            )));
        }
        self.delivered.lock().unwrap().push(photo.file_name.clone());
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

struct SyncFixture {
    base: PathBuf,
    photo_dir: PathBuf,
    ledger_path: PathBuf,
}

impl SyncFixture {
    fn new(files: &[&str]) -> Self {
        let base = std::env::temp_dir().join(format!("frame-sync-flow-{}", Uuid::new_v4()));
        let photo_dir = base.join("photos");
        let ledger_path = base.join("data").join("sent_photos.db");
        std::fs::create_dir_all(&photo_dir).unwrap();
        for name in files {
            std::fs::write(photo_dir.join(name), b"image-bytes").unwrap();
        }
        Self {
            base,
            photo_dir,
            ledger_path,
        }
    }

    fn engine(&self, transport: Arc<dyn PhotoTransport>) -> SyncEngine {
        SyncEngine::new(
            SyncConfig::new(&self.photo_dir, &self.ledger_path),
            transport,
        )
    }
}

impl Drop for SyncFixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.base);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn full_run_then_idempotent_rerun() {
    let fixture = SyncFixture::new(&["b.jpg", "a.jpg", "m.png"]);
    let transport = Arc::new(ScriptedTransport::new());

    let summary = fixture.engine(transport.clone()).run().await.unwrap();
    assert_eq!(summary.sent, 3);
    assert_eq!(summary.skipped, 0);
    assert!(summary.is_complete());
    assert_eq!(transport.delivered(), vec!["a.jpg", "b.jpg", "m.png"]);

    // Unchanged source + unchanged ledger: the second run delivers nothing.
    let summary = fixture.engine(transport.clone()).run().await.unwrap();
    assert_eq!(summary.sent, 0);
    assert_eq!(summary.skipped, 3);
    assert_eq!(transport.delivered().len(), 3);
}

#[tokio::test]
async fn deferred_photo_is_delivered_on_the_next_run() {
    let fixture = SyncFixture::new(&["a.jpg", "b.jpg", "c.jpg"]);
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail_for(&["b.jpg"]);

    let summary = fixture.engine(transport.clone()).run().await.unwrap();
    assert_eq!(summary.sent, 2);
    assert_eq!(summary.deferred, vec!["b.jpg".to_string()]);

    // Destination recovers; only the deferred photo goes out.
    transport.fail_for(&[]);
    let summary = fixture.engine(transport.clone()).run().await.unwrap();
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.skipped, 2);
    assert!(summary.is_complete());
    assert_eq!(transport.delivered(), vec!["a.jpg", "c.jpg", "b.jpg"]);
}

#[tokio::test]
async fn new_photos_are_picked_up_without_resending_old_ones() {
    let fixture = SyncFixture::new(&["a.jpg"]);
    let transport = Arc::new(ScriptedTransport::new());

    fixture.engine(transport.clone()).run().await.unwrap();

    std::fs::write(fixture.photo_dir.join("b.jpg"), b"image-bytes").unwrap();

    let summary = fixture.engine(transport.clone()).run().await.unwrap();
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(transport.delivered(), vec!["a.jpg", "b.jpg"]);
}

#[tokio::test]
async fn ledger_state_survives_between_runs() {
    let fixture = SyncFixture::new(&["a.jpg"]);
    let transport = Arc::new(ScriptedTransport::new());

    fixture.engine(transport.clone()).run().await.unwrap();

    // Inspect the ledger the way a fresh process would.
    let ledger = SqliteSentLedger::open(&fixture.ledger_path).await.unwrap();
    assert!(ledger.contains("a.jpg").await.unwrap());
    assert_eq!(
        ledger.sent_file_names().await.unwrap(),
        vec!["a.jpg".to_string()]
    );
    ledger.close().await;
}

#[tokio::test]
async fn missing_photo_dir_aborts_the_run() {
    let fixture = SyncFixture::new(&[]);
    std::fs::remove_dir_all(&fixture.photo_dir).unwrap();

    let transport = Arc::new(ScriptedTransport::new());
    let result = fixture.engine(transport.clone()).run().await;

    assert!(result.is_err());
    assert!(transport.delivered().is_empty());
}
