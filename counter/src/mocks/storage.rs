//! Mock key-value store for testing.

use crate::error::StorageError;
use crate::providers::KeyValueStore;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
}

/// Mock key-value store.
///
/// Uses in-memory storage and records every successful write in order.
/// Reads or writes can be made to fail per key to simulate a flaky or
/// crashed backend. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored value (not recorded as a write).
    #[must_use]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.values.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Make every read of `key` fail.
    #[must_use]
    pub fn with_failing_reads(self, key: &str) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing_reads.insert(key.to_string());
        }
        self
    }

    /// Make every write of `key` fail, leaving the stored value untouched.
    #[must_use]
    pub fn with_failing_writes(self, key: &str) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing_writes.insert(key.to_string());
        }
        self
    }

    /// Current value stored under `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.values.get(key).cloned())
    }

    /// Successful writes so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.inner
            .lock()
            .map(|inner| inner.writes.clone())
            .unwrap_or_default()
    }

    /// Successful writes of `key` so far, oldest first.
    #[must_use]
    pub fn writes_for(&self, key: &str) -> Vec<String> {
        self.writes()
            .into_iter()
            .filter(|(written, _)| written == key)
            .map(|(_, value)| value)
            .collect()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        let inner = Arc::clone(&self.inner);
        let key = key.to_string();

        async move {
            let inner = inner
                .lock()
                .map_err(|_| StorageError::Unavailable("Mutex lock failed".to_string()))?;

            if inner.failing_reads.contains(&key) {
                return Err(StorageError::Unavailable(format!("read of {key:?} failed")));
            }

            Ok(inner.values.get(&key).cloned())
        }
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        let inner = Arc::clone(&self.inner);
        let key = key.to_string();
        let value = value.to_string();

        async move {
            let mut inner = inner
                .lock()
                .map_err(|_| StorageError::Unavailable("Mutex lock failed".to_string()))?;

            if inner.failing_writes.contains(&key) {
                return Err(StorageError::Unavailable(format!("write of {key:?} failed")));
            }

            inner.values.insert(key.clone(), value.clone());
            inner.writes.push((key, value));
            Ok(())
        }
    }
}
