//! The state machine engine.
//!
//! A [`StateMachine`] runs a caller-owned table of [`State`] records on a
//! bounded stack of active states. Handlers request structural changes
//! through a one-deep opcode slot; the dispatch loop in
//! [`StateMachine::handle_event`] performs them.
//!
//! The engine is single-threaded and not re-entrant: `handle_event` must
//! return before the next event is delivered to the same machine.

mod dispatch;
mod operations;

use crate::core::{Opcode, OpcodeSlot, State, StateStack};
use crate::error::{ConfigError, ErrorReporter, StateError};

/// Hierarchical state machine over a borrowed state table.
///
/// `C` is the caller's context payload, handed to every hook through the
/// machine. `E` is the event type delivered to `run` handlers.
pub struct StateMachine<'a, C, E> {
    table: Option<&'a [State<C, E>]>,
    context: Option<C>,
    stack: StateStack,
    slot: OpcodeSlot,
    /// Bubble level of the `run` handler currently executing.
    running_level: Option<usize>,
    reporter: Option<&'a dyn ErrorReporter>,
}

impl<'a, C, E> StateMachine<'a, C, E> {
    /// Create an unbound machine with an empty stack.
    pub fn new() -> Self {
        Self {
            table: None,
            context: None,
            stack: StateStack::default(),
            slot: OpcodeSlot::default(),
            running_level: None,
            reporter: None,
        }
    }

    /// Bind the state table. Succeeds exactly once per machine.
    ///
    /// A failed call leaves any existing binding untouched.
    pub fn set_states(&mut self, table: &'a [State<C, E>]) -> Result<(), ConfigError> {
        if self.table.is_some() {
            return Err(ConfigError::AlreadyBound);
        }
        if table.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        tracing::debug!(states = table.len(), "state table bound");
        self.table = Some(table);
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.table.is_some()
    }

    /// Number of states in the bound table, or 0 when unbound.
    pub fn state_count(&self) -> usize {
        self.table.map_or(0, <[State<C, E>]>::len)
    }

    /// Name of the state at `index` in the bound table.
    pub fn state_name(&self, index: usize) -> Option<&'static str> {
        self.table?.get(index).map(|state| state.name)
    }

    /// Attach the context payload, replacing any previous one.
    pub fn set_context(&mut self, context: C) {
        self.context = Some(context);
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.context.as_mut()
    }

    /// Detach and return the context payload.
    pub fn take_context(&mut self) -> Option<C> {
        self.context.take()
    }

    /// Reset the stack to the first state in the table and run its `entry`
    /// hook.
    ///
    /// Calling `begin` again re-runs initialization without exiting the
    /// states that were active.
    pub fn begin(&mut self) -> Result<(), ConfigError> {
        let table = self.table.ok_or(ConfigError::Unbound)?;

        self.stack.reset(0);
        self.slot.clear();
        self.running_level = None;

        tracing::debug!(state = table[0].name, "state machine started");
        self.enter(table, 0);
        Ok(())
    }

    /// Index of the innermost active state, or `None` before [`begin`].
    ///
    /// [`begin`]: StateMachine::begin
    pub fn current_state(&self) -> Option<usize> {
        self.stack.top()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Active state indices, root first.
    pub fn stack(&self) -> &[usize] {
        self.stack.as_slice()
    }

    /// The opcode currently waiting in the slot, if any.
    pub fn pending_opcode(&self) -> Option<Opcode> {
        self.slot.peek().map(|pending| pending.opcode)
    }

    /// Register the reporter that receives [`StateError`]s. Replaces any
    /// previous reporter and takes effect immediately, even mid-dispatch.
    pub fn set_error_handler(&mut self, reporter: &'a dyn ErrorReporter) {
        self.reporter = Some(reporter);
    }

    pub fn clear_error_handler(&mut self) {
        self.reporter = None;
    }

    /// Log `error`, forward it to the reporter and hand it back.
    fn report(&self, error: StateError) -> StateError {
        tracing::warn!(?error, "state machine protocol error");
        if let Some(reporter) = self.reporter {
            reporter.report(&error);
        }
        error
    }

    fn enter(&mut self, table: &'a [State<C, E>], index: usize) {
        tracing::trace!(state = table[index].name, "entry");
        if let Some(entry) = table[index].entry {
            entry(self);
        }
    }

    fn leave(&mut self, table: &'a [State<C, E>], index: usize) {
        tracing::trace!(state = table[index].name, "exit");
        if let Some(exit) = table[index].exit {
            exit(self);
        }
    }
}

impl<C, E> Default for StateMachine<'_, C, E> {
    fn default() -> Self {
        Self::new()
    }
}
