//! Line-driven console front end.
//!
//! Each input line is one user intent. An empty line is a tap.

use crate::types::{CounterAction, CounterState};
use std::fmt::Write as _;

/// Width of the rendered progress bar, in cells
const BAR_WIDTH: usize = 20;

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  <Enter>, tap, +      count one mantra
  target <n>, t <n>    set a new target
  reset, r             set the count back to zero
  close, c             dismiss the completion notice and start over
  help, h, ?           show this help
  quit, q, exit        save and leave";

/// A parsed console command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Count one mantra
    Tap,
    /// Set the target to the given raw text
    SetTarget(String),
    /// Reset the count
    Reset,
    /// Dismiss the reached notification
    Close,
    /// Print [`HELP`]
    Help,
    /// Leave the program
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line. Returns `None` for unknown commands.
    ///
    /// The target text is passed through untouched so the reducer reports
    /// exactly what was typed.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" | "tap" | "+" => Some(Self::Tap),
            "target" | "t" => Some(Self::SetTarget(rest.to_string())),
            "reset" | "r" => Some(Self::Reset),
            "close" | "c" => Some(Self::Close),
            "help" | "h" | "?" => Some(Self::Help),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// The store action for this command, if it has one
    #[must_use]
    pub fn into_action(self) -> Option<CounterAction> {
        match self {
            Self::Tap => Some(CounterAction::Increment),
            Self::SetTarget(input) => Some(CounterAction::SetTarget { input }),
            Self::Reset => Some(CounterAction::Reset),
            Self::Close => Some(CounterAction::CloseNotification),
            Self::Help | Self::Quit => None,
        }
    }
}

/// Render the counter screen.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)] // progress is in [0, 1]
pub fn render(state: &CounterState) -> String {
    let progress = state.progress();
    let filled = ((progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let percent = (progress * 100.0).round() as u64;

    let mut out = format!(
        "{count} / {target}  [{bar}{rest}] {percent}%",
        count = state.count,
        target = state.target,
        bar = "#".repeat(filled),
        rest = "-".repeat(BAR_WIDTH - filled),
    );

    if let Some(error) = &state.last_error {
        let _ = write!(out, "\n  ! {error}");
    }

    if let Some(message) = state.reached_message() {
        let _ = write!(out, "\n  *** {message} *** (type `close` to start again)");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CounterError;
    use crate::types::Target;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ConsoleCommand::parse(""), Some(ConsoleCommand::Tap));
        assert_eq!(ConsoleCommand::parse("  \n"), Some(ConsoleCommand::Tap));
        assert_eq!(ConsoleCommand::parse("+"), Some(ConsoleCommand::Tap));
        assert_eq!(ConsoleCommand::parse("RESET"), Some(ConsoleCommand::Reset));
        assert_eq!(ConsoleCommand::parse("c"), Some(ConsoleCommand::Close));
        assert_eq!(ConsoleCommand::parse("?"), Some(ConsoleCommand::Help));
        assert_eq!(ConsoleCommand::parse("exit"), Some(ConsoleCommand::Quit));
        assert_eq!(ConsoleCommand::parse("dance"), None);
    }

    #[test]
    fn test_parse_target_keeps_raw_text() {
        assert_eq!(
            ConsoleCommand::parse("target  50 "),
            Some(ConsoleCommand::SetTarget("50".to_string()))
        );
        assert_eq!(
            ConsoleCommand::parse("t 2.5"),
            Some(ConsoleCommand::SetTarget("2.5".to_string()))
        );
        assert_eq!(
            ConsoleCommand::parse("target"),
            Some(ConsoleCommand::SetTarget(String::new()))
        );
    }

    #[test]
    fn test_into_action() {
        assert_eq!(ConsoleCommand::Tap.into_action(), Some(CounterAction::Increment));
        assert_eq!(
            ConsoleCommand::Close.into_action(),
            Some(CounterAction::CloseNotification)
        );
        assert_eq!(ConsoleCommand::Quit.into_action(), None);
        assert_eq!(ConsoleCommand::Help.into_action(), None);
    }

    #[test]
    fn test_render_progress() {
        let mut state = CounterState::with_target(Target::new(4).unwrap_or_default());
        state.count = 1;

        assert_eq!(render(&state), "1 / 4  [#####---------------] 25%");
    }

    #[test]
    fn test_render_error_and_banner() {
        let mut state = CounterState::with_target(Target::new(2).unwrap_or_default());
        state.count = 3;
        state.target_reached = true;
        state.last_error = Some(CounterError::InvalidTarget {
            input: "abc".to_string(),
        });

        let screen = render(&state);
        assert!(screen.starts_with("3 / 2  [####################] 100%"));
        assert!(screen.contains("please enter a valid number greater than 0"));
        assert!(screen.contains("You've completed 2 mantras!"));
    }
}
