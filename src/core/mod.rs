//! Core building blocks of the engine.
//!
//! This module contains the data the dispatch loop works on:
//! - State records and handler return codes
//! - Opcodes and the one-deep opcode slot
//! - The fixed-capacity state stack

mod opcode;
mod stack;
mod state;

pub(crate) use opcode::{OpcodeSlot, Pending};
pub(crate) use stack::StateStack;

pub use opcode::Opcode;
pub use state::{ChangeHandler, RunHandler, State, StateReturn};
