//! # Mantra Counter
//!
//! A persisted tally with a target and a one-shot "target reached"
//! notification.
//!
//! ## Architecture
//!
//! - [`CounterReducer`] is a pure state machine over [`CounterState`]. It
//!   never touches storage or hardware directly.
//! - Every mutating action returns effects that write the changed value
//!   (`count` or `target`) through [`KeyValueStore`], and an increment that
//!   lands on or above the target also returns a notification effect that
//!   goes through [`Notifier`].
//! - `Initialize` reads both keys and feeds them back as
//!   [`CounterAction::Loaded`]. Missing or malformed values keep the
//!   defaults (count `0`, target `108`).
//!
//! ## Example
//!
//! ```no_run
//! use mantra_counter::mocks::test_environment;
//! use mantra_counter::{CounterAction, CounterReducer, CounterState, CounterStore};
//!
//! # async fn example() -> Result<(), mantra_runtime::StoreError> {
//! let store: CounterStore<_, _> =
//!     CounterStore::new(CounterState::default(), CounterReducer::new(), test_environment());
//!
//! store.send(CounterAction::Initialize).await?.wait().await;
//! store.send(CounterAction::Increment).await?.wait().await;
//!
//! let count = store.state(|s| s.count).await;
//! assert_eq!(count, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod file_store;
pub mod mocks;
pub mod providers;
pub mod reducer;
pub mod sound;
pub mod types;
pub mod write_order;

pub use config::CounterConfig;
pub use error::{CounterError, NotificationError, StorageError};
pub use file_store::FileStore;
pub use providers::{KeyValueStore, Notifier};
pub use reducer::{CounterEnvironment, CounterReducer};
pub use sound::{ConsoleNotifier, SoundEngine};
pub use types::{
    COUNT_KEY, CounterAction, CounterState, DEFAULT_TARGET, TARGET_KEY, Target, parse_count,
};
pub use write_order::WriteOrder;

/// Store running the counter reducer over adapters `K` and `N`
pub type CounterStore<K, N> = mantra_runtime::Store<
    CounterState,
    CounterAction,
    CounterEnvironment<K, N>,
    CounterReducer<K, N>,
>;
