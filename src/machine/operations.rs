//! Stack operations requested from inside a `run` handler.
//!
//! None of these touch the stack directly. Each one validates its request
//! and parks it in the opcode slot; the dispatch loop applies it once the
//! handler returns.

use super::StateMachine;
use crate::core::{Opcode, Pending};
use crate::error::StateError;

impl<C, E> StateMachine<'_, C, E> {
    /// Request that `index` be entered on top of the handling state.
    ///
    /// Fails with [`StateError::InvalidState`] for an index outside the
    /// table, [`StateError::StateStackOverflow`] when the stack is already
    /// at capacity, and [`StateError::AmbiguousOperation`] when another
    /// operation is already pending. Every failure is also reported.
    pub fn push_state(&mut self, index: usize) -> Result<(), StateError> {
        if index >= self.state_count() {
            return Err(self.report(StateError::InvalidState { requested: index }));
        }
        if self.stack.is_full() {
            return Err(self.report(StateError::StateStackOverflow { requested: index }));
        }
        self.raise(Opcode::Push(index))
    }

    /// Request that the handling state leave the stack.
    ///
    /// The root state can never be popped; trying reports
    /// [`StateError::StateStackUnderflow`].
    pub fn pop_state(&mut self) -> Result<(), StateError> {
        if self.handling_level() <= 1 {
            return Err(self.report(StateError::StateStackUnderflow));
        }
        self.raise(Opcode::Pop)
    }

    /// Request that the handling state be replaced by `index`.
    pub fn transition_state(&mut self, index: usize) -> Result<(), StateError> {
        if index >= self.state_count() {
            return Err(self.report(StateError::InvalidState { requested: index }));
        }
        self.raise(Opcode::Transition(index))
    }

    /// Level of the handler that is asking. Outside dispatch this is the
    /// top of the stack.
    fn handling_level(&self) -> usize {
        self.running_level.unwrap_or_else(|| self.stack.depth())
    }

    fn raise(&mut self, opcode: Opcode) -> Result<(), StateError> {
        let level = self.handling_level();
        self.raise_at(opcode, level)
    }

    /// Park `opcode` in the slot. A slot that is already occupied keeps
    /// its opcode and the attempt is reported as ambiguous.
    pub(super) fn raise_at(&mut self, opcode: Opcode, level: usize) -> Result<(), StateError> {
        match self.slot.raise(opcode, level) {
            Ok(()) => {
                tracing::trace!(%opcode, level, "opcode raised");
                Ok(())
            }
            Err(existing) => Err(self.report(self.ambiguity(existing, opcode))),
        }
    }

    pub(super) fn ambiguity(&self, existing: Pending, attempted: Opcode) -> StateError {
        StateError::AmbiguousOperation {
            initial: existing.opcode,
            attempted,
            state_at_raise: self.stack.level(existing.level).unwrap_or_default(),
            current_state: self.stack.top().unwrap_or_default(),
        }
    }
}
