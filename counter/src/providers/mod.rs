//! Adapter traits for the counter's external collaborators.
//!
//! The reducer never performs I/O itself. Effects reach storage and the
//! notification hardware through these traits, which the environment
//! carries. Production implementations live in [`crate::file_store`] and
//! [`crate::sound`]; in-memory ones in [`crate::mocks`].

pub mod notifier;
pub mod storage;

pub use notifier::Notifier;
pub use storage::KeyValueStore;
