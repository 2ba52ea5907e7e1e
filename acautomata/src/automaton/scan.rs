use std::hash::Hash;

use super::{Automaton, StateId};

impl<T: Eq + Hash + Clone> Automaton<T> {
    /// Start offsets of every occurrence of every pattern in `input`.
    ///
    /// The outer `Vec` is indexed like the pattern list; each inner `Vec` is
    /// in ascending order. Overlapping occurrences are all reported.
    pub fn occurrences_by_offset(&self, input: &[T]) -> Vec<Vec<usize>> {
        let mut offsets = vec![Vec::new(); self.pattern_count];
        let mut state = StateId::ROOT;
        for (position, atom) in input.iter().enumerate() {
            state = self.step_with(state, atom, |terminal| {
                offsets[terminal.pattern].push(terminal.start(position));
            });
        }
        offsets
    }

    /// Number of occurrences of every pattern in `input`, indexed like the
    /// pattern list.
    pub fn counts_by_pattern(&self, input: &[T]) -> Vec<usize> {
        let mut counts = vec![0; self.pattern_count];
        let mut state = StateId::ROOT;
        for atom in input {
            state = self.step_with(state, atom, |terminal| counts[terminal.pattern] += 1);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(patterns: &[&str]) -> Vec<Vec<char>> {
        patterns.iter().map(|p| p.chars().collect()).collect()
    }

    fn input(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_counts_for_nested_suffixes() {
        let patterns = chars(&["foobar", "oobar", "obar", "bar", "ar", "r"]);
        let automaton = Automaton::build(&patterns);
        let counts = automaton.counts_by_pattern(&input("foobarfoobazbarr"));
        assert_eq!(counts, vec![1, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_single_atom_offsets() {
        let automaton = Automaton::build(&chars(&["o"]));
        let offsets = automaton.occurrences_by_offset(&input("foobarfoobazbarr"));
        assert_eq!(offsets[0].len(), 4);
        assert_eq!(offsets[0], vec![1, 2, 7, 8]);
    }

    #[test]
    fn test_offsets_after_fallback() {
        let automaton = Automaton::build(&chars(&["abcd", "bce", "c"]));
        let offsets = automaton.occurrences_by_offset(&input("xabcex"));
        assert_eq!(offsets, vec![Vec::<usize>::new(), vec![2], vec![3]]);
    }

    #[test]
    fn test_empty_pattern_never_reported() {
        let automaton = Automaton::build(&chars(&["", "a"]));
        let text = input("banana");
        assert_eq!(automaton.counts_by_pattern(&text), vec![0, 3]);
        assert_eq!(
            automaton.occurrences_by_offset(&text),
            vec![vec![], vec![1, 3, 5]]
        );
    }

    #[test]
    fn test_empty_input() {
        let automaton = Automaton::build(&chars(&["a", "b"]));
        assert_eq!(automaton.counts_by_pattern(&[]), vec![0, 0]);
        assert_eq!(
            automaton.occurrences_by_offset(&[]),
            vec![Vec::<usize>::new(), Vec::new()]
        );
    }

    #[test]
    fn test_duplicate_reports_later_index() {
        let automaton = Automaton::build(&chars(&["na", "na"]));
        assert_eq!(automaton.counts_by_pattern(&input("banana")), vec![0, 2]);
    }

    #[test]
    fn test_tokens_as_atoms() {
        let patterns = vec![vec!["new", "york"], vec!["york"]];
        let automaton = Automaton::build(&patterns);
        let text = ["in", "new", "york", "and", "york"];
        assert_eq!(automaton.counts_by_pattern(&text), vec![1, 2]);
        assert_eq!(
            automaton.occurrences_by_offset(&text),
            vec![vec![1], vec![2, 4]]
        );
    }
}
