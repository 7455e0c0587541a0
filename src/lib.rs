//! Statestack: a deterministic, allocation-free hierarchical state machine
//!
//! A machine runs a flat table of states on a bounded stack of active
//! states. The innermost state sees every event first; events it does not
//! handle bubble toward the root. Handlers never change the stack
//! themselves. They request at most one operation per event (push a
//! substate, pop back to the parent, or transition to a sibling) and the
//! dispatch loop performs it, calling `exit` and `entry` hooks in strict
//! bracket order.
//!
//! # Core Concepts
//!
//! - **State**: a record of hooks (`entry`, `run`, `exit`) identified by its
//!   table index
//! - **Stack**: the active chain of states, at most [`MAX_STATE_STACK_DEPTH`]
//!   deep
//! - **Opcode slot**: a one-deep mailbox holding the pending stack operation;
//!   a second request before it is applied is an ambiguous operation
//! - **Error reporter**: receives [`StateError`]s; the engine never panics on
//!   a bad request
//!
//! # Example
//!
//! ```rust
//! use statestack::{State, StateMachine, StateReturn};
//!
//! #[derive(Default)]
//! struct Lamp {
//!     switched_on: u32,
//! }
//!
//! enum Event {
//!     Toggle,
//! }
//!
//! const OFF: usize = 0;
//! const ON: usize = 1;
//!
//! fn off(machine: &mut StateMachine<'_, Lamp, Event>, event: &Event) -> StateReturn {
//!     match event {
//!         Event::Toggle => {
//!             let _ = machine.transition_state(ON);
//!             StateReturn::Transition
//!         }
//!     }
//! }
//!
//! fn on(machine: &mut StateMachine<'_, Lamp, Event>, event: &Event) -> StateReturn {
//!     match event {
//!         Event::Toggle => {
//!             let _ = machine.transition_state(OFF);
//!             StateReturn::Transition
//!         }
//!     }
//! }
//!
//! fn count(machine: &mut StateMachine<'_, Lamp, Event>) {
//!     if let Some(lamp) = machine.context_mut() {
//!         lamp.switched_on += 1;
//!     }
//! }
//!
//! let table = [State::new("off", off), State::new("on", on).with_entry(count)];
//!
//! let mut machine: StateMachine<'_, Lamp, Event> = StateMachine::new();
//! machine.set_states(&table).unwrap();
//! machine.set_context(Lamp::default());
//! machine.begin().unwrap();
//!
//! assert_eq!(machine.handle_event(&Event::Toggle), StateReturn::Transition);
//! assert_eq!(machine.current_state(), Some(ON));
//! assert_eq!(machine.handle_event(&Event::Toggle), StateReturn::Transition);
//! assert_eq!(machine.current_state(), Some(OFF));
//! assert_eq!(machine.context().map(|lamp| lamp.switched_on), Some(1));
//! ```

pub mod core;
pub mod error;
pub mod machine;

/// Capacity of the state stack.
pub const MAX_STATE_STACK_DEPTH: usize = 8;

// Re-export commonly used types
pub use crate::core::{Opcode, State, StateReturn};
pub use error::{ConfigError, ErrorReporter, StateError};
pub use machine::StateMachine;
