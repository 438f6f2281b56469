//! Mock notifier for testing.

use crate::error::NotificationError;
use crate::providers::Notifier;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock notifier.
///
/// Counts vibrations and sound playback attempts. A silent notifier behaves
/// like a device whose sound asset failed to load. Clones share counters.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    vibrations: Arc<AtomicUsize>,
    sound_attempts: Arc<AtomicUsize>,
    silent: bool,
}

impl RecordingNotifier {
    /// Create a notifier whose sound always plays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier whose sound is unavailable.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    /// Number of vibration pulses so far.
    #[must_use]
    pub fn vibrations(&self) -> usize {
        self.vibrations.load(Ordering::SeqCst)
    }

    /// Number of playback attempts so far, successful or not.
    #[must_use]
    pub fn sound_attempts(&self) -> usize {
        self.sound_attempts.load(Ordering::SeqCst)
    }
}

impl Notifier for RecordingNotifier {
    fn vibrate(&self) {
        self.vibrations.fetch_add(1, Ordering::SeqCst);
    }

    fn play_sound(&self) -> impl Future<Output = Result<(), NotificationError>> + Send {
        self.sound_attempts.fetch_add(1, Ordering::SeqCst);
        let silent = self.silent;

        async move {
            if silent {
                Err(NotificationError::SoundUnavailable(
                    "mock sound not loaded".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }
}
