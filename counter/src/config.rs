//! Configuration management for the counter binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Every variable is optional; unparsable values fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// Directory holding the persisted `count` and `target` files
    pub data_dir: PathBuf,
    /// Bundled notification sound asset
    pub sound_path: PathBuf,
    /// Command line used to play the sound (e.g. `aplay -q`); `None` keeps
    /// the notification silent
    pub sound_player: Option<String>,
    /// Seconds to wait for in-flight writes when quitting (default: 5)
    pub shutdown_timeout_secs: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".mantra-counter"),
            sound_path: PathBuf::from("notification.wav"),
            sound_player: None,
            shutdown_timeout_secs: 5,
        }
    }
}

impl CounterConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                       | Default             |
    /// |--------------------------------|---------------------|
    /// | `MANTRA_DATA_DIR`              | `.mantra-counter`   |
    /// | `MANTRA_SOUND_PATH`            | `notification.wav`  |
    /// | `MANTRA_SOUND_PLAYER`          | unset (silent)      |
    /// | `MANTRA_SHUTDOWN_TIMEOUT_SECS` | `5`                 |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            data_dir: non_empty("MANTRA_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            sound_path: non_empty("MANTRA_SOUND_PATH").map_or(defaults.sound_path, PathBuf::from),
            sound_player: non_empty("MANTRA_SOUND_PLAYER"),
            shutdown_timeout_secs: non_empty("MANTRA_SHUTDOWN_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.shutdown_timeout_secs),
        }
    }

    /// Set the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the sound asset path.
    #[must_use]
    pub fn with_sound_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sound_path = path.into();
        self
    }

    /// Set the sound player command.
    #[must_use]
    pub fn with_sound_player(mut self, player: impl Into<String>) -> Self {
        self.sound_player = Some(player.into());
        self
    }

    /// Set the shutdown timeout.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout_secs = timeout.as_secs();
        self
    }

    /// Shutdown timeout as a `Duration`
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CounterConfig::from_lookup(|_| None);
        assert_eq!(config, CounterConfig::default());
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = CounterConfig::from_lookup(lookup(&[
            ("MANTRA_DATA_DIR", "/var/lib/mantra"),
            ("MANTRA_SOUND_PATH", "/usr/share/mantra/bell.wav"),
            ("MANTRA_SOUND_PLAYER", "paplay"),
            ("MANTRA_SHUTDOWN_TIMEOUT_SECS", "12"),
        ]));

        let expected = CounterConfig::default()
            .with_data_dir("/var/lib/mantra")
            .with_sound_path("/usr/share/mantra/bell.wav")
            .with_sound_player("paplay")
            .with_shutdown_timeout(Duration::from_secs(12));

        assert_eq!(config, expected);
    }

    #[test]
    fn test_invalid_and_empty_values_fall_back() {
        let config = CounterConfig::from_lookup(lookup(&[
            ("MANTRA_DATA_DIR", "  "),
            ("MANTRA_SOUND_PLAYER", ""),
            ("MANTRA_SHUTDOWN_TIMEOUT_SECS", "soon"),
        ]));

        assert_eq!(config, CounterConfig::default());
    }
}
