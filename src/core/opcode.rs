//! Opcodes and the single-slot mailbox between `run` handlers and the
//! dispatch loop.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pending request for the dispatch loop.
///
/// `Push`, `Pop` and `Transition` are raised by state handlers; `Run`,
/// `Returned` and `Unhandled` are raised by the dispatch loop itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// The event was consumed, no further operations.
    Returned,
    /// Run the handler at the current bubble level.
    Run,
    /// Enter the given state on top of the handling level.
    Push(usize),
    /// Leave the handling level.
    Pop,
    /// Replace the handling level with the given state.
    Transition(usize),
    /// No state on the stack handled the event.
    Unhandled,
}

impl Opcode {
    /// Short lowercase name of the opcode kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Returned => "returned",
            Self::Run => "run",
            Self::Push(_) => "push",
            Self::Pop => "pop",
            Self::Transition(_) => "transition",
            Self::Unhandled => "unhandled",
        }
    }

    /// Target state index for `Push` and `Transition`.
    pub fn target(&self) -> Option<usize> {
        match self {
            Self::Push(target) | Self::Transition(target) => Some(*target),
            _ => None,
        }
    }

    /// Whether this opcode was requested by a state handler.
    pub fn is_stack_operation(&self) -> bool {
        matches!(self, Self::Push(_) | Self::Pop | Self::Transition(_))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target() {
            Some(target) => write!(f, "{}({target})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

/// An opcode waiting in the slot, with the stack level it was raised at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Pending {
    pub opcode: Opcode,
    pub level: usize,
}

/// One-deep mailbox. The first opcode raised wins until it is taken.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OpcodeSlot {
    pending: Option<Pending>,
}

impl OpcodeSlot {
    /// Store `opcode` if the slot is free; otherwise hand back what is
    /// already pending and leave it untouched.
    pub fn raise(&mut self, opcode: Opcode, level: usize) -> Result<(), Pending> {
        match self.pending {
            Some(existing) => Err(existing),
            None => {
                self.pending = Some(Pending { opcode, level });
                Ok(())
            }
        }
    }

    /// Overwrite the slot, returning whatever was discarded.
    pub fn seed(&mut self, opcode: Opcode, level: usize) -> Option<Pending> {
        self.pending.replace(Pending { opcode, level })
    }

    pub fn take(&mut self) -> Option<Pending> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Pending> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
