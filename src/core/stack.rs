//! Fixed-capacity stack of active state indices.
//!
//! Levels are 1-based: level 1 is the root state, level `depth()` is the
//! current (innermost) state.

use crate::MAX_STATE_STACK_DEPTH;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StateStack {
    entries: [usize; MAX_STATE_STACK_DEPTH],
    depth: usize,
}

impl StateStack {
    /// Drop everything and start over with `root` at level 1.
    pub fn reset(&mut self, root: usize) {
        self.entries = [0; MAX_STATE_STACK_DEPTH];
        self.entries[0] = root;
        self.depth = 1;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_full(&self) -> bool {
        self.depth >= MAX_STATE_STACK_DEPTH
    }

    pub fn top(&self) -> Option<usize> {
        self.level(self.depth)
    }

    /// State index at `level`, if that level is occupied.
    pub fn level(&self, level: usize) -> Option<usize> {
        if level == 0 || level > self.depth {
            return None;
        }
        Some(self.entries[level - 1])
    }

    /// Append `index`; hands it back when the stack is full.
    pub fn push(&mut self, index: usize) -> Result<(), usize> {
        if self.is_full() {
            return Err(index);
        }
        self.entries[self.depth] = index;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<usize> {
        let top = self.top()?;
        self.depth -= 1;
        Some(top)
    }

    /// Swap the index stored at `level`, returning the previous one.
    pub fn replace(&mut self, level: usize, index: usize) -> Option<usize> {
        let previous = self.level(level)?;
        self.entries[level - 1] = index;
        Some(previous)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.entries[..self.depth]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_has_no_levels() {
        let stack = StateStack::default();

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.top(), None);
        assert_eq!(stack.level(1), None);
        assert!(stack.as_slice().is_empty());
    }

    #[test]
    fn reset_places_root() {
        let mut stack = StateStack::default();
        stack.push(3).unwrap();
        stack.push(4).unwrap();

        stack.reset(0);

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.as_slice(), &[0]);
    }

    #[test]
    fn push_and_pop_are_lifo() {
        let mut stack = StateStack::default();
        stack.reset(0);
        stack.push(1).unwrap();
        stack.push(2).unwrap();

        assert_eq!(stack.top(), Some(2));
        assert_eq!(stack.level(2), Some(1));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.as_slice(), &[0]);
    }

    #[test]
    fn push_refuses_beyond_capacity() {
        let mut stack = StateStack::default();
        stack.reset(0);
        for index in 1..MAX_STATE_STACK_DEPTH {
            stack.push(index).unwrap();
        }

        assert!(stack.is_full());
        assert_eq!(stack.push(9), Err(9));
        assert_eq!(stack.depth(), MAX_STATE_STACK_DEPTH);
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut stack = StateStack::default();
        stack.reset(0);
        stack.push(1).unwrap();

        assert_eq!(stack.replace(1, 5), Some(0));
        assert_eq!(stack.as_slice(), &[5, 1]);
        assert_eq!(stack.replace(3, 7), None);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut stack = StateStack::default();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
    }
}
