use std::hash::Hash;

use super::{Automaton, StateId};

/// A scan in progress over one automaton.
///
/// The automaton itself holds no scan state, so any number of cursors can
/// share it. A cursor remembers the current state and how many atoms it has
/// consumed, which lets input arrive in chunks of any size.
#[derive(Debug, Clone)]
pub struct Cursor<'a, T> {
    automaton: &'a Automaton<T>,
    state: StateId,
    position: usize,
}

impl<'a, T: Eq + Hash + Clone> Cursor<'a, T> {
    pub fn new(automaton: &'a Automaton<T>) -> Self {
        Self {
            automaton,
            state: StateId::ROOT,
            position: 0,
        }
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    /// Atoms consumed since creation or the last reset.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) {
        self.state = StateId::ROOT;
        self.position = 0;
    }

    /// Consumes one atom, returning the patterns that end at it.
    pub fn feed(&mut self, atom: &T) -> Vec<usize> {
        let step = self.automaton.step(self.state, atom);
        self.state = step.state;
        self.position += 1;
        step.matches
    }

    /// Consumes a chunk, returning the patterns that end at each of its atoms.
    pub fn feed_all(&mut self, chunk: &[T]) -> Vec<Vec<usize>> {
        chunk.iter().map(|atom| self.feed(atom)).collect()
    }

    /// Consumes a chunk, returning `(pattern, start_offset)` for every match.
    /// Offsets count from the first atom ever fed, so a match spanning two
    /// chunks reports where it began in the earlier one.
    pub fn feed_offsets(&mut self, chunk: &[T]) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        for atom in chunk {
            let position = self.position;
            self.state = self.automaton.step_with(self.state, atom, |terminal| {
                found.push((terminal.pattern, terminal.start(position)));
            });
            self.position += 1;
        }
        found
    }

    /// Consumes a chunk, adding one to `counts[pattern]` per match.
    ///
    /// `counts` must have at least [`Automaton::pattern_count`] entries.
    pub fn feed_counts(&mut self, chunk: &[T], counts: &mut [usize]) {
        for atom in chunk {
            self.state = self
                .automaton
                .step_with(self.state, atom, |terminal| counts[terminal.pattern] += 1);
            self.position += 1;
        }
    }
}
