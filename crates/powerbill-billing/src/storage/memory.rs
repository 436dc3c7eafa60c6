use crate::domain::types::CustomerRecord;
use crate::error::{BillingError, Result};
use crate::storage::RecordRepository;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory repository for development/testing.
///
/// Clones share the same storage, so a test can keep a handle and inspect
/// what the service saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordRepository {
    records: Arc<Mutex<Vec<CustomerRecord>>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CustomerRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            ..Self::default()
        }
    }

    /// Make every following save fail as an unwritable medium would.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<CustomerRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl RecordRepository for InMemoryRecordRepository {
    fn load_all(&self) -> Result<Vec<CustomerRecord>> {
        Ok(self.snapshot())
    }

    fn save_all(&self, records: &[CustomerRecord]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BillingError::storage(
                "save records",
                io::Error::new(io::ErrorKind::PermissionDenied, "storage is read-only"),
            ));
        }
        let mut stored = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *stored = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
