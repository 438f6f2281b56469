//! Reducer logic for the mantra counter.
//!
//! Every mutating action persists a full snapshot of the value it changed
//! (`count` or `target`) as a separate effect. Writes are never batched or
//! retried; a failed write is logged and the in-memory state stays
//! authoritative. Each write is stamped when the reducer commits the value,
//! so a slow older write can never land over a newer one.
//!
//! An increment re-evaluates `count >= target` every time, so once the
//! target is met (for example after lowering it below the current count)
//! each further tap sets the flag and notifies again. The behaviour is kept
//! as-is pending a product decision.

use crate::error::NotificationError;
use crate::providers::{KeyValueStore, Notifier};
use crate::types::{COUNT_KEY, CounterAction, CounterState, TARGET_KEY, Target, parse_count};
use crate::write_order::WriteOrder;
use mantra_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Counter environment
///
/// Holds the persistence and notification adapters and the write order
/// for persisted keys. Everything is shared (`Arc`) so effects can carry it
/// into spawned tasks.
pub struct CounterEnvironment<K, N> {
    /// Durable key-value storage for `count` and `target`
    pub storage: Arc<K>,
    /// Vibration and sound for the reached notification
    pub notifier: Arc<N>,
    /// Orders writes of the same key
    pub writes: Arc<WriteOrder>,
}

impl<K, N> CounterEnvironment<K, N> {
    /// Create a new counter environment
    #[must_use]
    pub fn new(storage: Arc<K>, notifier: Arc<N>) -> Self {
        Self {
            storage,
            notifier,
            writes: Arc::new(WriteOrder::new()),
        }
    }
}

impl<K, N> Clone for CounterEnvironment<K, N> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            notifier: Arc::clone(&self.notifier),
            writes: Arc::clone(&self.writes),
        }
    }
}

/// Counter reducer
///
/// Generic over the storage and notifier types so tests can swap in the
/// in-memory mocks.
pub struct CounterReducer<K, N> {
    _phantom: PhantomData<fn() -> (K, N)>,
}

impl<K, N> CounterReducer<K, N> {
    /// Create a new counter reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<K, N> Default for CounterReducer<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, N> Clone for CounterReducer<K, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, N> Copy for CounterReducer<K, N> {}

impl<K, N> std::fmt::Debug for CounterReducer<K, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterReducer").finish()
    }
}

impl<K, N> CounterReducer<K, N>
where
    K: KeyValueStore + 'static,
    N: Notifier + 'static,
{
    /// Write `value` under `key`, logging failures
    ///
    /// The revision is taken here, while the reducer holds the state.
    fn persist(
        env: &CounterEnvironment<K, N>,
        key: &'static str,
        value: u64,
    ) -> Effect<CounterAction> {
        let storage = Arc::clone(&env.storage);
        let writes = Arc::clone(&env.writes);
        let revision = writes.next_revision();
        async_effect! {
            let value = value.to_string();
            match writes.write(&*storage, key, &value, revision).await {
                Ok(true) => tracing::trace!(key, value = %value, revision, "Persisted value"),
                Ok(false) => tracing::trace!(key, revision, "Skipped stale write"),
                Err(error) => tracing::warn!(key, %error, "Failed to persist value"),
            }
            None
        }
    }

    /// Vibrate and play the notification sound
    fn notify(notifier: &Arc<N>) -> Effect<CounterAction> {
        let notifier = Arc::clone(notifier);
        async_effect! {
            notifier.vibrate();
            match notifier.play_sound().await {
                Ok(()) => {},
                Err(error @ NotificationError::SoundUnavailable(_)) => {
                    tracing::debug!(%error, "Skipping notification sound");
                },
                Err(error) => tracing::warn!(%error, "Notification sound playback failed"),
            }
            None
        }
    }

    /// Read both keys and feed the parsed values back as `Loaded`
    fn load(storage: &Arc<K>) -> Effect<CounterAction> {
        let storage = Arc::clone(storage);
        async_effect! {
            let count = read_key(&*storage, COUNT_KEY)
                .await
                .and_then(|raw| {
                    let parsed = parse_count(&raw);
                    if parsed.is_none() {
                        tracing::warn!(key = COUNT_KEY, raw = %raw, "Ignoring malformed stored count");
                    }
                    parsed
                });

            let target = read_key(&*storage, TARGET_KEY)
                .await
                .and_then(|raw| match raw.parse::<Target>() {
                    Ok(target) => Some(target),
                    Err(error) => {
                        tracing::warn!(key = TARGET_KEY, %error, "Ignoring malformed stored target");
                        None
                    },
                });

            Some(CounterAction::Loaded { count, target })
        }
    }
}

/// Read one key, treating any storage error as absent
async fn read_key<K: KeyValueStore>(storage: &K, key: &'static str) -> Option<String> {
    match storage.get(key).await {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "Failed to read persisted value, using default");
            None
        },
    }
}

impl<K, N> Reducer for CounterReducer<K, N>
where
    K: KeyValueStore + 'static,
    N: Notifier + 'static,
{
    type State = CounterState;
    type Action = CounterAction;
    type Environment = CounterEnvironment<K, N>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            CounterAction::Initialize => smallvec![Self::load(&env.storage)],

            CounterAction::Increment => {
                state.count = state.count.saturating_add(1);
                state.last_error = None;

                let mut effects: SmallVec<[Effect<Self::Action>; 4]> =
                    smallvec![Self::persist(env, COUNT_KEY, state.count)];

                if state.count >= state.target.get() {
                    tracing::debug!(count = state.count, target = %state.target, "Target reached");
                    state.target_reached = true;
                    effects.push(Self::notify(&env.notifier));
                }

                effects
            },

            CounterAction::Reset => {
                state.count = 0;
                state.last_error = None;
                tracing::debug!("Count reset");
                smallvec![Self::persist(env, COUNT_KEY, 0)]
            },

            CounterAction::SetTarget { input } => match input.parse::<Target>() {
                Ok(target) => {
                    state.target = target;
                    state.last_error = None;
                    tracing::debug!(target = %target, "Target updated");
                    smallvec![Self::persist(env, TARGET_KEY, target.get())]
                },
                Err(error) => {
                    tracing::debug!(%error, "Rejected target");
                    state.last_error = Some(error);
                    SmallVec::new()
                },
            },

            CounterAction::CloseNotification => {
                state.target_reached = false;
                state.count = 0;
                state.last_error = None;
                tracing::debug!("Notification closed, starting a new round");
                smallvec![Self::persist(env, COUNT_KEY, 0)]
            },

            // ========== Events ==========
            CounterAction::Loaded { count, target } => {
                if let Some(count) = count {
                    state.count = count;
                }
                if let Some(target) = target {
                    state.target = target;
                }
                tracing::info!(count = state.count, target = %state.target, "Counter loaded");
                SmallVec::new()
            },
        }
    }
}
