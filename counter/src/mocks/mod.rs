//! In-memory adapters for tests and demos.

mod notifier;
mod storage;

pub use notifier::RecordingNotifier;
pub use storage::InMemoryStore;

use crate::reducer::CounterEnvironment;
use std::sync::Arc;

/// Environment backed by a fresh [`InMemoryStore`] and [`RecordingNotifier`]
#[must_use]
pub fn test_environment() -> CounterEnvironment<InMemoryStore, RecordingNotifier> {
    CounterEnvironment::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(RecordingNotifier::new()),
    )
}
