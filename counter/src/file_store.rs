//! File-backed key-value store.
//!
//! Each key lives in its own file under the store's root directory, holding
//! the value as plain text. Writes go to a uniquely named temporary file
//! that is then renamed over the key's file, so a crash mid-write leaves
//! either the old or the new value, never a torn one, and never touches
//! another key.

use crate::error::StorageError;
use crate::providers::KeyValueStore;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Durable local key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    write_seq: Arc<AtomicU64>,
}

impl FileStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created on the first write, so a missing directory
    /// reads as an empty store.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Keys map straight to file names, so only `[A-Za-z0-9_-]` is allowed.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

        if valid {
            Ok(())
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        let path = self.root.join(key);
        let key = key.to_string();

        async move {
            Self::validate_key(&key)?;

            match tokio::fs::read_to_string(&path).await {
                Ok(value) => Ok(Some(value)),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
                Err(source) => Err(StorageError::Io { key, source }),
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        let root = self.root.clone();
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let key = key.to_string();
        let value = value.to_string();

        async move {
            Self::validate_key(&key)?;

            let io_error = |source| StorageError::Io {
                key: key.clone(),
                source,
            };

            tokio::fs::create_dir_all(&root).await.map_err(io_error)?;

            // Dot prefix keeps temp files out of the key namespace
            let tmp = root.join(format!(".{key}.{}.{seq}.tmp", std::process::id()));
            let path = root.join(&key);

            if let Err(source) = tokio::fs::write(&tmp, value.as_bytes()).await {
                let _ = tokio::fs::remove_file(&tmp).await;
                return Err(io_error(source));
            }

            if let Err(source) = tokio::fs::rename(&tmp, &path).await {
                let _ = tokio::fs::remove_file(&tmp).await;
                return Err(io_error(source));
            }

            tracing::trace!(key = %key, path = %path.display(), "Wrote key file");
            Ok(())
        }
    }
}
