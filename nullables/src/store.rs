//! Nullable store: thread-safe in-memory wallet state for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use envelope_store::{StoreError, WalletReconciliationState, WalletStateStore};
use envelope_types::WalletAddress;

/// An in-memory wallet state store for testing.
///
/// Reads and writes can be made to fail independently to exercise the
/// fail-soft paths. Every successful `save` is counted.
pub struct NullWalletStore {
    records: Mutex<HashMap<String, WalletReconciliationState>>,
    fail_reads: AtomicBool,
    failing_reads_left: AtomicUsize,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl NullWalletStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            failing_reads_left: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Insert a record directly, bypassing the write counter.
    pub fn seed(&self, wallet: &WalletAddress, state: WalletReconciliationState) {
        self.records
            .lock()
            .unwrap()
            .insert(wallet.to_string(), state);
    }

    /// The stored record, regardless of scripted failures.
    pub fn snapshot(&self, wallet: &WalletAddress) -> Option<WalletReconciliationState> {
        self.records.lock().unwrap().get(wallet.as_str()).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Fail only the next `count` reads, then recover.
    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads_left.store(count, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for NullWalletStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletStateStore for NullWalletStore {
    fn load(&self, wallet: &WalletAddress) -> Result<Option<WalletReconciliationState>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("scripted read failure".to_string()));
        }
        let transient = self
            .failing_reads_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if transient {
            return Err(StoreError::Unavailable("scripted transient read failure".to_string()));
        }
        Ok(self.snapshot(wallet))
    }

    fn save(&self, wallet: &WalletAddress, state: &WalletReconciliationState) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("scripted write failure".to_string()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(wallet.to_string(), state.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envelope_types::TimestampMs;

    fn wallet() -> WalletAddress {
        WalletAddress::parse("0xabc").unwrap()
    }

    #[test]
    fn save_then_load() {
        let store = NullWalletStore::new();
        let state = WalletReconciliationState {
            last_opened_at: Some(TimestampMs::new(7)),
            ..Default::default()
        };
        store.save(&wallet(), &state).unwrap();
        assert_eq!(store.load(&wallet()).unwrap(), Some(state));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn scripted_failures() {
        let store = NullWalletStore::new();
        store.fail_reads(true);
        assert!(store.load(&wallet()).is_err());
        store.fail_writes(true);
        assert!(store.save(&wallet(), &WalletReconciliationState::default()).is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn transient_read_failures_recover() {
        let store = NullWalletStore::new();
        store.fail_next_reads(2);
        assert!(store.load(&wallet()).is_err());
        assert!(store.load(&wallet()).is_err());
        assert!(store.load(&wallet()).unwrap().is_none());
    }

    #[test]
    fn seed_does_not_count_as_write() {
        let store = NullWalletStore::new();
        store.seed(&wallet(), WalletReconciliationState::default());
        assert_eq!(store.write_count(), 0);
        assert!(store.snapshot(&wallet()).is_some());
    }
}
