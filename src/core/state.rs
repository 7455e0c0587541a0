//! State records for the state table.
//!
//! A state is plain data: a name and up to three hooks. It carries no
//! behaviour of its own beyond what its hooks do, and its identity is its
//! position in the table handed to [`StateMachine::set_states`].

use crate::machine::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a state's `run` handler, and of a whole dispatch pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum StateReturn {
    /// The event was consumed.
    Ok,
    /// The event was not handled by this state (or by any state, when
    /// returned from [`StateMachine::handle_event`]).
    Unhandled,
    /// Handling the event resulted in a state transition.
    Transition,
}

impl fmt::Display for StateReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::Unhandled => "unhandled",
            Self::Transition => "transition",
        };
        f.write_str(name)
    }
}

/// Hook invoked when a state enters or leaves the stack.
pub type ChangeHandler<C, E> = fn(&mut StateMachine<'_, C, E>);

/// Hook invoked for every event delivered to a state.
pub type RunHandler<C, E> = fn(&mut StateMachine<'_, C, E>, &E) -> StateReturn;

/// One entry in a state table.
///
/// `run` is mandatory; `entry` and `exit` are no-ops when absent. Hooks may
/// reach the caller's payload through [`StateMachine::context_mut`].
///
/// Only `run` may request stack operations. Calling
/// [`StateMachine::push_state`], [`StateMachine::pop_state`] or
/// [`StateMachine::transition_state`] from `entry` or `exit` is a
/// precondition violation and its effect is unspecified.
///
/// # Example
///
/// ```rust
/// use statestack::{State, StateMachine, StateReturn};
///
/// fn idle(_: &mut StateMachine<'_, (), u8>, event: &u8) -> StateReturn {
///     if *event == 0 {
///         StateReturn::Ok
///     } else {
///         StateReturn::Unhandled
///     }
/// }
///
/// fn wake(_: &mut StateMachine<'_, (), u8>) {}
///
/// const IDLE: State<(), u8> = State::new("idle", idle).with_entry(wake);
///
/// assert_eq!(IDLE.name, "idle");
/// assert!(IDLE.entry.is_some());
/// assert!(IDLE.exit.is_none());
/// ```
pub struct State<C, E> {
    /// Display name used in diagnostics.
    pub name: &'static str,
    /// Called when the state is placed on the stack.
    pub entry: Option<ChangeHandler<C, E>>,
    /// Called for every event the state sees.
    pub run: RunHandler<C, E>,
    /// Called when the state leaves the stack.
    pub exit: Option<ChangeHandler<C, E>>,
}

impl<C, E> State<C, E> {
    /// Create a state with only a `run` handler.
    pub const fn new(name: &'static str, run: RunHandler<C, E>) -> Self {
        Self {
            name,
            entry: None,
            run,
            exit: None,
        }
    }

    /// Attach an `entry` hook.
    pub const fn with_entry(self, entry: ChangeHandler<C, E>) -> Self {
        Self {
            name: self.name,
            entry: Some(entry),
            run: self.run,
            exit: self.exit,
        }
    }

    /// Attach an `exit` hook.
    pub const fn with_exit(self, exit: ChangeHandler<C, E>) -> Self {
        Self {
            name: self.name,
            entry: self.entry,
            run: self.run,
            exit: Some(exit),
        }
    }
}

// Derives would demand `C: Clone` and `E: Clone`; the record only holds
// function pointers.
impl<C, E> Clone for State<C, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, E> Copy for State<C, E> {}

impl<C, E> fmt::Debug for State<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("entry", &self.entry.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}
