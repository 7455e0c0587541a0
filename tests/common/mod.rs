//! Five-state fixture shared by the integration tests.
//!
//! States `a`..`e` sit at indices 0..4. Every state reacts to the same
//! commands, and every hook writes to the [`Journal`] context so tests can
//! check entry/exit ordering.

#![allow(dead_code)]

use statestack::{State, StateError, StateMachine, StateReturn};
use std::cell::RefCell;

pub const A: usize = 0;
pub const B: usize = 1;
pub const C: usize = 2;
pub const D: usize = 3;
pub const E: usize = 4;
pub const STATE_COUNT: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Hook {
    Entry(usize),
    Exit(usize),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Transition to the next state, wrapping e -> a.
    Next,
    /// Transition to the previous state, wrapping a -> e.
    Prev,
    Push(usize),
    Pop,
    Jump(usize),
    /// Consumed only by the named state.
    HandleIn(usize),
    /// Only `source` reacts: it requests a transition to `dest` and
    /// returns `Ok` rather than `Transition`.
    NestedJump { source: usize, dest: usize },
    /// Only `source` reacts, pushing `dest`.
    NestedPush { source: usize, dest: usize },
    /// Only `source` reacts, popping itself.
    NestedPop { source: usize },
    /// Two transitions from one handler.
    Ambiguous,
}

#[derive(Debug, Default)]
pub struct Journal {
    pub hooks: Vec<Hook>,
}

impl Journal {
    pub fn take(&mut self) -> Vec<Hook> {
        std::mem::take(&mut self.hooks)
    }
}

pub type Machine<'a> = StateMachine<'a, Journal, Command>;

fn run<const I: usize>(machine: &mut Machine<'_>, command: &Command) -> StateReturn {
    match *command {
        Command::Next => {
            let _ = machine.transition_state((I + 1) % STATE_COUNT);
            StateReturn::Transition
        }
        Command::Prev => {
            let _ = machine.transition_state((I + STATE_COUNT - 1) % STATE_COUNT);
            StateReturn::Transition
        }
        Command::Push(target) => {
            let _ = machine.push_state(target);
            StateReturn::Ok
        }
        Command::Pop => {
            let _ = machine.pop_state();
            StateReturn::Ok
        }
        Command::Jump(target) => {
            let _ = machine.transition_state(target);
            StateReturn::Transition
        }
        Command::HandleIn(state) if state == I => StateReturn::Ok,
        Command::NestedJump { source, dest } if source == I => {
            let _ = machine.transition_state(dest);
            StateReturn::Ok
        }
        Command::NestedPush { source, dest } if source == I => {
            let _ = machine.push_state(dest);
            StateReturn::Ok
        }
        Command::NestedPop { source } if source == I => {
            let _ = machine.pop_state();
            StateReturn::Ok
        }
        Command::Ambiguous => {
            let _ = machine.transition_state(A);
            let _ = machine.transition_state(B);
            StateReturn::Transition
        }
        _ => StateReturn::Unhandled,
    }
}

fn entry<const I: usize>(machine: &mut Machine<'_>) {
    if let Some(journal) = machine.context_mut() {
        journal.hooks.push(Hook::Entry(I));
    }
}

fn exit<const I: usize>(machine: &mut Machine<'_>) {
    if let Some(journal) = machine.context_mut() {
        journal.hooks.push(Hook::Exit(I));
    }
}

pub const STATES: [State<Journal, Command>; STATE_COUNT] = [
    State::new("a", run::<A>).with_entry(entry::<A>).with_exit(exit::<A>),
    State::new("b", run::<B>).with_entry(entry::<B>).with_exit(exit::<B>),
    State::new("c", run::<C>).with_entry(entry::<C>).with_exit(exit::<C>),
    State::new("d", run::<D>).with_entry(entry::<D>).with_exit(exit::<D>),
    State::new("e", run::<E>).with_entry(entry::<E>).with_exit(exit::<E>),
];

/// A bound, started machine with an empty journal.
pub fn started_machine() -> Machine<'static> {
    let mut machine = StateMachine::new();
    machine
        .set_states(&STATES)
        .expect("fixture table binds");
    machine.set_context(Journal::default());
    machine.begin().expect("fixture machine starts");
    journal(&mut machine);
    machine
}

pub fn journal(machine: &mut Machine<'_>) -> Vec<Hook> {
    machine.context_mut().map(Journal::take).unwrap_or_default()
}

/// Collects every error the machine reports.
#[derive(Default)]
pub struct ErrorLog {
    pub errors: RefCell<Vec<StateError>>,
}

impl statestack::ErrorReporter for ErrorLog {
    fn report(&self, error: &StateError) {
        self.errors.borrow_mut().push(*error);
    }
}

impl ErrorLog {
    pub fn snapshot(&self) -> Vec<StateError> {
        self.errors.borrow().clone()
    }

    pub fn count_matching(&self, predicate: impl Fn(&StateError) -> bool) -> usize {
        self.errors.borrow().iter().filter(|e| predicate(e)).count()
    }
}
