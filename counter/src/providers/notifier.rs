//! Threshold notification trait.

use crate::error::NotificationError;
use std::future::Future;

/// Haptic and audio cue fired when the count reaches the target.
pub trait Notifier: Send + Sync {
    /// Pulse the vibration motor. Fire-and-forget.
    fn vibrate(&self);

    /// Play the notification sound once.
    ///
    /// The result only feeds diagnostics; it never changes counter state.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::SoundUnavailable`] if the asset never
    /// loaded, or [`NotificationError::PlaybackFailed`] if playback failed.
    fn play_sound(&self) -> impl Future<Output = Result<(), NotificationError>> + Send;
}
