//! Per-key ordering of snapshot writes.
//!
//! Persist effects run as independent tasks, so two writes of the same key
//! can reach the backend in either order. Each write is stamped with a
//! revision while the reducer holds the state, writes of one key go through
//! that key's lock, and a write older than the last one applied is dropped.
//! The backend therefore never moves backwards to an older snapshot.

use crate::error::StorageError;
use crate::providers::KeyValueStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Revision counter plus the last applied revision of every key.
#[derive(Debug, Default)]
pub struct WriteOrder {
    next: AtomicU64,
    applied: Mutex<HashMap<&'static str, Arc<tokio::sync::Mutex<u64>>>>,
}

impl WriteOrder {
    /// Create an empty write order
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new write. Revisions start at 1 and only grow.
    ///
    /// Call this from the reducer, so revision order matches the order in
    /// which values were committed to state.
    pub fn next_revision(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn slot(&self, key: &'static str) -> Arc<tokio::sync::Mutex<u64>> {
        let mut applied = self.applied.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(applied.entry(key).or_default())
    }

    /// Write `value` under `key` unless a newer revision already landed.
    ///
    /// Returns `Ok(false)` when the write was skipped as stale. A failed
    /// write does not advance the key's revision.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the write itself fails.
    pub async fn write<K>(
        &self,
        storage: &K,
        key: &'static str,
        value: &str,
        revision: u64,
    ) -> Result<bool, StorageError>
    where
        K: KeyValueStore,
    {
        let slot = self.slot(key);
        let mut applied = slot.lock().await;

        if *applied >= revision {
            return Ok(false);
        }

        storage.set(key, value).await?;
        *applied = revision;
        Ok(true)
    }
}
