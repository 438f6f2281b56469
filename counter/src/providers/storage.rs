//! Key-value persistence trait.

use crate::error::StorageError;
use std::future::Future;

/// Asynchronous string key-value store.
///
/// # Implementation Notes
///
/// - Keys are independent: a failed operation on one key must not corrupt
///   any other key
/// - No transaction spans two keys
/// - `set` stores the full value; callers never write deltas
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// # Returns
    ///
    /// `None` if nothing has been stored under `key` yet.
    ///
    /// # Errors
    ///
    /// Returns error if the key is invalid or the backend cannot be read.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns error if the key is invalid or the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
