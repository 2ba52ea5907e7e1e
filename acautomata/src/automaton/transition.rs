use std::hash::Hash;

use super::{Automaton, StateId, Terminal};

/// Outcome of feeding one atom to the automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Patterns ending at this atom, longest first
    pub matches: Vec<usize>,
    /// State to pass to the next call
    pub state: StateId,
}

impl<T: Eq + Hash + Clone> Automaton<T> {
    /// Advances `state` by one atom and reports every pattern that ends here.
    ///
    /// This never fails: when no transition exists anywhere along the
    /// failure chain the scan restarts at the root with no matches.
    ///
    /// ```
    /// use acautomata::{Automaton, StateId};
    ///
    /// let automaton = Automaton::build(&[b"ab".to_vec(), b"b".to_vec()]);
    /// let first = automaton.step(StateId::ROOT, &b'a');
    /// assert!(first.matches.is_empty());
    /// let second = automaton.step(first.state, &b'b');
    /// assert_eq!(second.matches, vec![0, 1]);
    /// ```
    pub fn step(&self, state: StateId, atom: &T) -> Step {
        let mut matches = Vec::new();
        let state = self.step_with(state, atom, |terminal| matches.push(terminal.pattern));
        Step { matches, state }
    }

    /// Same transition as [`Automaton::step`], handing each terminal to
    /// `on_match` instead of collecting pattern indices.
    ///
    /// Batch scanners use this to get at `match_len` without allocating per
    /// atom.
    pub fn step_with<F>(&self, state: StateId, atom: &T, mut on_match: F) -> StateId
    where
        F: FnMut(Terminal),
    {
        let mut current = state;
        loop {
            let node = self.node(current);
            if let Some(next) = node.child(atom) {
                let target = self.node(next);
                if let Some(terminal) = target.terminal {
                    on_match(terminal);
                }
                for alt in self.alternatives(next) {
                    if let Some(terminal) = alt.terminal {
                        on_match(terminal);
                    }
                }
                return next;
            }
            if current.is_root() {
                return StateId::ROOT;
            }
            current = node.fail;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(patterns: &[&str]) -> Automaton<char> {
        let patterns: Vec<Vec<char>> = patterns.iter().map(|p| p.chars().collect()).collect();
        Automaton::build(&patterns)
    }

    fn run(automaton: &Automaton<char>, input: &str) -> Vec<Step> {
        let mut state = StateId::ROOT;
        input
            .chars()
            .map(|c| {
                let step = automaton.step(state, &c);
                state = step.state;
                step
            })
            .collect()
    }

    #[test]
    fn test_unknown_atom_returns_to_root() {
        let automaton = build(&["abc"]);
        let steps = run(&automaton, "abz");
        assert_eq!(steps[2].state, StateId::ROOT);
        assert!(steps.iter().all(|s| s.matches.is_empty()));
    }

    #[test]
    fn test_falls_back_through_failure_link() {
        let automaton = build(&["abcd", "bce"]);
        let steps = run(&automaton, "abce");
        assert_eq!(steps[3].matches, vec![1]);
    }

    #[test]
    fn test_suffix_matches_are_reported_longest_first() {
        let automaton = build(&["foobar", "oobar", "obar", "bar", "ar", "r"]);
        let steps = run(&automaton, "foobar");
        assert_eq!(steps[5].matches, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_state_is_always_valid() {
        let automaton = build(&["i", "in", "tin", "pin", "string"]);
        for step in run(&automaton, "pinpiiistringingting?!") {
            assert!(step.state.index() < automaton.len());
        }
    }

    #[test]
    fn test_root_with_no_patterns_never_moves() {
        let automaton = build(&[]);
        let step = automaton.step(StateId::ROOT, &'a');
        assert_eq!(step.state, StateId::ROOT);
        assert!(step.matches.is_empty());
    }

    #[test]
    fn test_step_with_reports_match_len() {
        let automaton = build(&["abc", "c"]);
        let mut terminals = Vec::new();
        let mut state = StateId::ROOT;
        for c in "abc".chars() {
            state = automaton.step_with(state, &c, |t| terminals.push(t));
        }
        assert_eq!(
            terminals,
            vec![
                Terminal {
                    pattern: 0,
                    match_len: 2
                },
                Terminal {
                    pattern: 1,
                    match_len: 0
                },
            ]
        );
    }
}
