//! Console notification adapter.
//!
//! The sound asset is loaded once when the process starts. If it cannot be
//! loaded, or no player command is configured, the engine remembers why and
//! every later playback returns [`NotificationError::SoundUnavailable`]
//! without trying again. Vibration is independent of the sound and always
//! fires.

use crate::error::NotificationError;
use crate::providers::Notifier;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

/// A sound asset that loaded and the command that plays it.
#[derive(Debug)]
struct LoadedSound {
    path: PathBuf,
    program: String,
    args: Vec<String>,
}

/// Plays the bundled notification sound through an external player.
#[derive(Debug, Clone)]
pub struct SoundEngine {
    sound: Result<Arc<LoadedSound>, NotificationError>,
}

impl SoundEngine {
    /// Load the sound asset at `path`, to be played with `player`.
    ///
    /// `player` is a command line such as `"aplay -q"`; the asset path is
    /// appended as the last argument. Failures are logged and produce an
    /// engine that stays silent.
    pub async fn load(path: impl AsRef<Path>, player: Option<&str>) -> Self {
        let path = path.as_ref();
        let sound = Self::try_load(path, player).await;

        match &sound {
            Ok(loaded) => tracing::info!(
                path = %loaded.path.display(),
                player = %loaded.program,
                "Notification sound loaded"
            ),
            Err(error) => tracing::warn!(%error, path = %path.display(), "Failed to load the sound"),
        }

        Self { sound }
    }

    /// An engine that never plays anything.
    #[must_use]
    pub fn silent(reason: impl Into<String>) -> Self {
        Self {
            sound: Err(NotificationError::SoundUnavailable(reason.into())),
        }
    }

    /// Whether the asset loaded and playback will be attempted
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.sound.is_ok()
    }

    async fn try_load(
        path: &Path,
        player: Option<&str>,
    ) -> Result<Arc<LoadedSound>, NotificationError> {
        let mut words = player.unwrap_or_default().split_whitespace();
        let Some(program) = words.next() else {
            return Err(NotificationError::SoundUnavailable(
                "no sound player configured".to_string(),
            ));
        };
        let args = words.map(str::to_string).collect();

        let metadata = tokio::fs::metadata(path).await.map_err(|error| {
            NotificationError::SoundUnavailable(format!("{}: {error}", path.display()))
        })?;

        if !metadata.is_file() || metadata.len() == 0 {
            return Err(NotificationError::SoundUnavailable(format!(
                "{} is not a non-empty file",
                path.display()
            )));
        }

        Ok(Arc::new(LoadedSound {
            path: path.to_path_buf(),
            program: program.to_string(),
            args,
        }))
    }

    /// Play the sound once and wait for the player to exit.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::SoundUnavailable`] if loading failed,
    /// or [`NotificationError::PlaybackFailed`] if the player could not be
    /// started or exited unsuccessfully.
    pub fn play(&self) -> impl Future<Output = Result<(), NotificationError>> + Send + 'static {
        let sound = self.sound.clone();

        async move {
            let sound = sound?;

            let status = tokio::process::Command::new(&sound.program)
                .args(&sound.args)
                .arg(&sound.path)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map_err(|error| {
                    NotificationError::PlaybackFailed(format!("{}: {error}", sound.program))
                })?;

            if status.success() {
                Ok(())
            } else {
                Err(NotificationError::PlaybackFailed(format!(
                    "{} exited with {status}",
                    sound.program
                )))
            }
        }
    }
}

/// Notifier for the console front end.
///
/// "Vibration" is the terminal bell on stderr.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    sound: SoundEngine,
}

impl ConsoleNotifier {
    /// Create a notifier that plays `sound`
    #[must_use]
    pub const fn new(sound: SoundEngine) -> Self {
        Self { sound }
    }
}

impl Notifier for ConsoleNotifier {
    fn vibrate(&self) {
        let mut stderr = std::io::stderr();
        if let Err(error) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            tracing::debug!(%error, "Terminal bell failed");
        }
    }

    fn play_sound(&self) -> impl Future<Output = Result<(), NotificationError>> + Send {
        self.sound.play()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_player_is_silent() {
        let engine = SoundEngine::load("notification.wav", None).await;

        assert!(!engine.is_available());
        assert!(matches!(
            engine.play().await,
            Err(NotificationError::SoundUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_asset_is_silent() {
        let dir = tempfile::tempdir().ok();
        let missing = dir
            .as_ref()
            .map_or_else(|| PathBuf::from("missing.wav"), |d| d.path().join("missing.wav"));

        let engine = SoundEngine::load(&missing, Some("true")).await;

        assert!(!engine.is_available());
        assert!(matches!(
            engine.play().await,
            Err(NotificationError::SoundUnavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_player_exit_status_is_reported() -> Result<(), std::io::Error> {
        let dir = tempfile::tempdir()?;
        let asset = dir.path().join("notification.wav");
        std::fs::write(&asset, b"RIFF")?;

        let ok = SoundEngine::load(&asset, Some("true")).await;
        assert!(ok.is_available());
        assert_eq!(ok.play().await, Ok(()));

        let failing = SoundEngine::load(&asset, Some("false")).await;
        assert!(matches!(
            failing.play().await,
            Err(NotificationError::PlaybackFailed(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_silent_engine() {
        let notifier = ConsoleNotifier::new(SoundEngine::silent("disabled"));

        assert_eq!(
            notifier.play_sound().await,
            Err(NotificationError::SoundUnavailable("disabled".to_string()))
        );
    }
}
