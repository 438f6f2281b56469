//! Domain types for the mantra counter.
//!
//! The counter is a two-state machine over `target_reached`:
//!
//! - **Counting** (`false`): increments persist the new count. An increment
//!   whose new count is at or above the target moves to **Reached**.
//! - **Reached** (`true`): `CloseNotification` returns to **Counting** and
//!   starts a new round at zero.
//!
//! `Reset` and `SetTarget` are valid in either state and never touch the flag.

use crate::error::CounterError;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Storage key for the persisted count
pub const COUNT_KEY: &str = "count";

/// Storage key for the persisted target
pub const TARGET_KEY: &str = "target";

/// Target used until the user picks one (one full mala)
pub const DEFAULT_TARGET: u64 = 108;

/// The goal tally. Always greater than zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(NonZeroU64);

impl Target {
    /// The built-in default target
    pub const DEFAULT: Self = Self(NonZeroU64::MIN.saturating_add(DEFAULT_TARGET - 1));

    /// Creates a target, or `None` for zero
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns the target as a plain integer
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses user or stored text as a target.
///
/// Surrounding whitespace is ignored. Anything that is not a whole number
/// greater than zero (empty, `"abc"`, `"2.5"`, `"0"`, `"-5"`) is rejected.
impl FromStr for Target {
    type Err = CounterError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| CounterError::InvalidTarget {
                input: input.to_string(),
            })
    }
}

/// Parses a stored count. Returns `None` unless the text is a non-negative
/// whole number.
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Counter state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterState {
    /// Current tally
    pub count: u64,
    /// Goal tally
    pub target: Target,
    /// Set by an increment that lands at or above the target; cleared only
    /// by `CloseNotification`
    pub target_reached: bool,
    /// Validation failure from the most recent user intent, for display
    pub last_error: Option<CounterError>,
}

impl CounterState {
    /// Creates a fresh state with the given target
    #[must_use]
    pub const fn with_target(target: Target) -> Self {
        Self {
            count: 0,
            target,
            target_reached: false,
            last_error: None,
        }
    }

    /// Fraction of the target completed, capped at `1.0`
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // display-only ratio
    pub fn progress(&self) -> f64 {
        (self.count as f64 / self.target.get() as f64).min(1.0)
    }

    /// Banner text shown while the reached notification is pending
    #[must_use]
    pub fn reached_message(&self) -> Option<String> {
        self.target_reached
            .then(|| format!("You've completed {} mantras!", self.target))
    }
}

/// Counter actions
///
/// User intents come from the presentation layer. `Loaded` is fed back by
/// the startup load effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CounterAction {
    // ========== Commands ==========
    /// Read the persisted count and target
    Initialize,
    /// Tap: add one to the count
    Increment,
    /// Set the count back to zero
    Reset,
    /// Replace the target with the parsed `input`
    SetTarget {
        /// Text from the target input field
        input: String,
    },
    /// Acknowledge the reached notification and start a new round
    CloseNotification,

    // ========== Events ==========
    /// Persisted values read at startup. `None` keeps the current value.
    Loaded {
        /// Stored count, if present and well-formed
        count: Option<u64>,
        /// Stored target, if present and well-formed
        target: Option<Target>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_is_108() {
        assert_eq!(Target::DEFAULT.get(), 108);
        assert_eq!(CounterState::default().target.get(), 108);
        assert_eq!(CounterState::default().count, 0);
    }

    #[test]
    fn test_target_parse_accepts_positive_integers() {
        assert_eq!("50".parse::<Target>().ok().map(Target::get), Some(50));
        assert_eq!(" 7 \n".parse::<Target>().ok().map(Target::get), Some(7));
        assert_eq!("1".parse::<Target>().ok().map(Target::get), Some(1));
    }

    #[test]
    fn test_target_parse_rejects_invalid_input() {
        for input in ["0", "-5", "abc", "", "   ", "2.5", "1e3", "99999999999999999999999"] {
            assert_eq!(
                input.parse::<Target>(),
                Err(CounterError::InvalidTarget {
                    input: input.to_string()
                }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("forty-two"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_progress_is_capped() {
        let mut state = CounterState::with_target(Target::new(4).unwrap_or_default());
        assert!((state.progress() - 0.0).abs() < f64::EPSILON);

        state.count = 1;
        assert!((state.progress() - 0.25).abs() < f64::EPSILON);

        state.count = 9;
        assert!((state.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reached_message() {
        let mut state = CounterState::default();
        assert_eq!(state.reached_message(), None);

        state.target_reached = true;
        assert_eq!(
            state.reached_message().as_deref(),
            Some("You've completed 108 mantras!")
        );
    }
}
