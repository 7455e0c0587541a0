//! Event dispatch.
//!
//! The loop below is a small stack VM. Each pass takes the opcode out of
//! the slot and acts on it at the current bubble level: `Run` calls the
//! handler, the stack operations perform the surgery the handler asked
//! for, and `Returned`/`Unhandled` end the pass.

use super::StateMachine;
use crate::core::{Opcode, State, StateReturn};
use crate::error::StateError;
use crate::MAX_STATE_STACK_DEPTH;

impl<'a, C, E> StateMachine<'a, C, E> {
    /// Deliver `event` to the innermost active state.
    ///
    /// Unhandled events bubble toward the root one level at a time. The
    /// first state that handles the event may request one stack operation,
    /// which is applied relative to that state's level: every state above
    /// it is exited first, innermost first.
    ///
    /// Returns [`StateReturn::Transition`] when a transition was applied,
    /// [`StateReturn::Unhandled`] when no state handled the event (or the
    /// machine has not been started), and [`StateReturn::Ok`] otherwise.
    pub fn handle_event(&mut self, event: &E) -> StateReturn {
        let Some(table) = self.table else {
            tracing::warn!("event delivered to a machine with no state table");
            return StateReturn::Unhandled;
        };
        let mut level = self.stack.depth();
        if level == 0 {
            tracing::warn!("event delivered before begin");
            return StateReturn::Unhandled;
        }

        // Operations raised outside a `run` handler are never executed.
        if let Some(stale) = self.slot.seed(Opcode::Run, level) {
            if stale.opcode.is_stack_operation() {
                let _ = self.report(self.ambiguity(stale, Opcode::Run));
            }
            tracing::warn!(
                opcode = %stale.opcode,
                "discarding opcode raised outside of a run handler"
            );
        }

        loop {
            let Some(pending) = self.slot.take() else {
                return StateReturn::Ok;
            };
            let Some(state) = self.stack.level(level) else {
                return StateReturn::Unhandled;
            };
            tracing::trace!(
                opcode = %pending.opcode,
                level,
                state = table[state].name,
                "dispatch"
            );

            match pending.opcode {
                Opcode::Returned => return StateReturn::Ok,
                Opcode::Unhandled => return StateReturn::Unhandled,
                Opcode::Run => {
                    self.running_level = Some(level);
                    let result = (table[state].run)(self, event);
                    self.running_level = None;

                    match result {
                        // A pending operation collides with the re-raise and
                        // then runs at the parent's level.
                        StateReturn::Unhandled if level > 1 => {
                            level -= 1;
                            if self.raise_at(Opcode::Run, level).is_ok() {
                                tracing::trace!(
                                    from = table[state].name,
                                    "event bubbling to parent"
                                );
                            }
                        }
                        StateReturn::Unhandled => {
                            let _ = self.raise_at(Opcode::Unhandled, level);
                        }
                        // A handler that raised its own operation keeps it;
                        // the terminal opcode is only a fallback.
                        StateReturn::Ok | StateReturn::Transition => {
                            let _ = self.slot.raise(Opcode::Returned, level);
                        }
                    }
                }
                Opcode::Push(target) => {
                    // After unwinding the depth is `level`.
                    if level >= MAX_STATE_STACK_DEPTH {
                        let _ = self.report(StateError::StateStackOverflow { requested: target });
                        return StateReturn::Ok;
                    }
                    self.unwind_to(table, level);
                    self.enter(table, target);
                    let pushed = self.stack.push(target);
                    debug_assert!(pushed.is_ok());
                    tracing::debug!(
                        state = table[target].name,
                        depth = self.stack.depth(),
                        "state pushed"
                    );
                    return StateReturn::Ok;
                }
                Opcode::Pop => {
                    if level <= 1 {
                        let _ = self.report(StateError::StateStackUnderflow);
                        return StateReturn::Ok;
                    }
                    self.unwind_to(table, level);
                    if let Some(popped) = self.stack.pop() {
                        self.leave(table, popped);
                        tracing::debug!(
                            state = table[popped].name,
                            depth = self.stack.depth(),
                            "state popped"
                        );
                    }
                    return StateReturn::Ok;
                }
                Opcode::Transition(target) => {
                    self.unwind_to(table, level);
                    self.leave(table, state);
                    self.enter(table, target);
                    self.stack.replace(level, target);
                    tracing::debug!(
                        from = table[state].name,
                        to = table[target].name,
                        depth = level,
                        "state transition"
                    );
                    return StateReturn::Transition;
                }
            }
        }
    }

    /// Exit every state above `level`, innermost first.
    fn unwind_to(&mut self, table: &'a [State<C, E>], level: usize) {
        while self.stack.depth() > level {
            match self.stack.pop() {
                Some(index) => self.leave(table, index),
                None => break,
            }
        }
    }
}
