//! Error types and the error-reporter seam.

use crate::core::Opcode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors, returned directly to the caller and never reported.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("State table already bound. set_states may only be called once")]
    AlreadyBound,

    #[error("State table is empty. Provide at least one state")]
    EmptyTable,

    #[error("No state table bound. Call .set_states(table) before .begin()")]
    Unbound,
}

/// Protocol errors raised while states request stack operations.
///
/// Every value is delivered to the registered [`ErrorReporter`] and also
/// returned from the call that triggered it.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateError {
    /// A second stack operation was requested before the first was applied.
    #[error(
        "Ambiguous operation: {attempted} requested while {initial} is pending \
         (raised in state {state_at_raise}, current state {current_state})"
    )]
    AmbiguousOperation {
        initial: Opcode,
        attempted: Opcode,
        state_at_raise: usize,
        current_state: usize,
    },

    #[error("Invalid state index {requested}")]
    InvalidState { requested: usize },

    #[error("State stack overflow while pushing state {requested}")]
    StateStackOverflow { requested: usize },

    #[error("State stack underflow: the root state cannot be popped")]
    StateStackUnderflow,
}

/// Receiver for [`StateError`] notifications.
///
/// Reports are delivered synchronously, on the thread that is dispatching
/// the event, before the failing call returns.
///
/// Any `Fn(&StateError)` closure is a reporter:
///
/// ```rust
/// use statestack::{ErrorReporter, StateError};
/// use std::cell::Cell;
///
/// let overflows = Cell::new(0);
/// let reporter = |error: &StateError| {
///     if matches!(error, StateError::StateStackOverflow { .. }) {
///         overflows.set(overflows.get() + 1);
///     }
/// };
///
/// reporter.report(&StateError::StateStackOverflow { requested: 2 });
/// assert_eq!(overflows.get(), 1);
/// ```
pub trait ErrorReporter {
    fn report(&self, error: &StateError);
}

impl<F> ErrorReporter for F
where
    F: Fn(&StateError),
{
    fn report(&self, error: &StateError) {
        self(error)
    }
}
