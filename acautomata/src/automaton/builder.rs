use std::collections::VecDeque;
use std::hash::Hash;
use tracing::debug;

use super::{Automaton, Node, StateId, Terminal};

impl<T: Eq + Hash + Clone> Automaton<T> {
    /// Builds an automaton matching every pattern in `patterns`.
    ///
    /// Pattern `i` is reported as index `i` by every scanning method.
    ///
    /// Two cases are accepted rather than rejected:
    /// - A zero-length pattern adds no node and can never match.
    /// - When the same pattern appears more than once, the last occurrence
    ///   owns the trie position, so only its index is ever reported.
    pub fn build<P: AsRef<[T]>>(patterns: &[P]) -> Self {
        let mut automaton = Self {
            nodes: vec![Node::new(StateId::ROOT, None)],
            pattern_count: patterns.len(),
        };

        for (index, pattern) in patterns.iter().enumerate() {
            automaton.insert(index, pattern.as_ref());
        }
        automaton.link_failures();

        debug!(
            "Built automaton with {} states from {} patterns",
            automaton.nodes.len(),
            automaton.pattern_count
        );
        automaton
    }

    /// Adds one pattern to the trie, creating nodes for any missing suffix of
    /// its path.
    fn insert(&mut self, index: usize, pattern: &[T]) {
        let Some(match_len) = pattern.len().checked_sub(1) else {
            debug!("Pattern {} is empty and will never match", index);
            return;
        };

        let mut current = StateId::ROOT;
        for atom in pattern {
            current = match self.nodes[current.index()].child(atom) {
                Some(next) => next,
                None => {
                    let id = StateId(self.nodes.len());
                    self.nodes.push(Node::new(id, Some(atom.clone())));
                    self.nodes[current.index()]
                        .children
                        .insert(atom.clone(), id);
                    id
                }
            };
        }

        let node = &mut self.nodes[current.index()];
        if let Some(previous) = node.terminal {
            debug!(
                "Pattern {} duplicates pattern {}; keeping {}",
                index, previous.pattern, index
            );
        }
        node.terminal = Some(Terminal {
            pattern: index,
            match_len,
        });
    }

    /// Computes failure and alternative links breadth-first.
    ///
    /// A node's links only depend on nodes strictly closer to the root, which
    /// the queue has always finished by the time the node is reached.
    fn link_failures(&mut self) {
        let mut queue: VecDeque<StateId> = VecDeque::new();

        self.nodes[StateId::ROOT.index()].fail = StateId::ROOT;
        let depth_one: Vec<StateId> = self.root().children.values().copied().collect();
        for child in depth_one {
            let node = &mut self.nodes[child.index()];
            node.fail = StateId::ROOT;
            node.alternative = None;
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let cur_fail = self.nodes[current.index()].fail;
            let children: Vec<(T, StateId)> = self.nodes[current.index()]
                .children
                .iter()
                .map(|(atom, &id)| (atom.clone(), id))
                .collect();

            for (atom, child) in children {
                let fail = self.suffix_child(cur_fail, &atom);
                let alternative = if self.nodes[fail.index()].is_match() {
                    Some(fail)
                } else {
                    self.nodes[fail.index()].alternative
                };

                let node = &mut self.nodes[child.index()];
                node.fail = fail;
                node.alternative = alternative;
                queue.push_back(child);
            }
        }
    }

    /// Starting at `from`, follows failure links until a node with a child for
    /// `atom` is found, returning that child; the root when there is none.
    fn suffix_child(&self, from: StateId, atom: &T) -> StateId {
        let mut temp = from;
        loop {
            let node = &self.nodes[temp.index()];
            if let Some(next) = node.child(atom) {
                return next;
            }
            if temp.is_root() {
                return StateId::ROOT;
            }
            temp = node.fail;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_prefixes_share_nodes() {
        let patterns = [b"abc".to_vec(), b"abd".to_vec(), b"ab".to_vec()];
        let automaton = Automaton::build(&patterns);

        // root, a, b, c, d
        assert_eq!(automaton.len(), 5);
        let terminals: Vec<usize> = automaton
            .nodes()
            .filter_map(|n| n.terminal())
            .map(|t| t.pattern)
            .collect();
        assert_eq!(terminals.len(), 3);
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let automaton = Automaton::build(&[b"xy".to_vec(), b"z".to_vec()]);
        let x = automaton.root().child(&b'x').unwrap();
        let y = automaton.node(x).child(&b'y').unwrap();
        let z = automaton.root().child(&b'z').unwrap();
        assert_eq!((x.index(), y.index(), z.index()), (1, 2, 3));
        assert_eq!(automaton.node(y).atom(), Some(&b'y'));
    }

    #[test]
    fn test_empty_pattern_adds_no_node() {
        let patterns: Vec<Vec<char>> = vec![vec![], vec!['a']];
        let automaton = Automaton::build(&patterns);
        assert_eq!(automaton.len(), 2);
        assert_eq!(automaton.pattern_count(), 2);
        assert!(!automaton.root().is_match());
    }

    #[test]
    fn test_no_patterns_leaves_only_root() {
        let patterns: Vec<Vec<char>> = Vec::new();
        let automaton = Automaton::build(&patterns);
        assert!(automaton.is_empty());
        assert_eq!(automaton.pattern_count(), 0);
    }

    #[test]
    fn test_duplicate_pattern_keeps_last_index() {
        let patterns = ["ab", "ab"].map(|p| p.chars().collect::<Vec<_>>());
        let automaton = Automaton::build(&patterns);
        let a = automaton.root().child(&'a').unwrap();
        let b = automaton.node(a).child(&'b').unwrap();
        assert_eq!(
            automaton.node(b).terminal(),
            Some(Terminal {
                pattern: 1,
                match_len: 1
            })
        );
    }

    #[test]
    fn test_prefix_pattern_marks_inner_node() {
        let patterns = ["abc", "a"].map(|p| p.chars().collect::<Vec<_>>());
        let automaton = Automaton::build(&patterns);
        let a = automaton.root().child(&'a').unwrap();
        assert_eq!(automaton.node(a).terminal().map(|t| t.pattern), Some(1));
        assert_eq!(automaton.node(a).terminal().map(|t| t.match_len), Some(0));
    }
}
