//! # Mantra Testing
//!
//! Testing utilities and helpers for reducers.
//!
//! This crate provides:
//! - [`ReducerTest`]: a Given-When-Then harness that runs a reducer once
//! - [`assertions`]: helpers for checking the effects a reducer returned
//!
//! ## Example
//!
//! ```ignore
//! use mantra_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(CounterReducer::new())
//!     .with_env(test_environment())
//!     .given_state(CounterState::default())
//!     .when_action(CounterAction::Reset)
//!     .then_state(|state| assert_eq!(state.count, 0))
//!     .then_effects(|effects| assertions::assert_effects_count(effects, 1))
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};
