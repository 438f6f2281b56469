//! Error types for the counter and its adapters.
//!
//! None of these are fatal. `CounterError` is surfaced to the user through
//! [`CounterState::last_error`](crate::types::CounterState::last_error); the
//! storage and notification errors are logged by the effects that hit them
//! and then dropped.

use thiserror::Error;

/// Errors produced by counter operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CounterError {
    /// The requested target is not a whole number greater than zero.
    #[error("Invalid target {input:?}: please enter a valid number greater than 0")]
    InvalidTarget {
        /// Raw text the user submitted
        input: String,
    },
}

/// Errors from a key-value persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters the backend cannot store.
    #[error("Invalid storage key {0:?}")]
    InvalidKey(String),

    /// Reading or writing the value failed.
    #[error("Storage I/O failed for key {key:?}: {source}")]
    Io {
        /// Key being read or written
        key: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the notification adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The sound asset never loaded, so playback is skipped.
    #[error("Notification sound unavailable: {0}")]
    SoundUnavailable(String),

    /// The sound loaded but playing it failed.
    #[error("Notification sound playback failed: {0}")]
    PlaybackFailed(String),
}
