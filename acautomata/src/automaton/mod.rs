//! Multi-pattern exact matching with an Aho-Corasick automaton.
//!
//! The automaton is stored as an arena: every node lives in one `Vec`, and
//! all links between nodes (children, failure links, alternative links) are
//! plain indices into that `Vec`. This compares to a .NET object graph as
//! follows:
//!
//! ```csharp
//! class Node {
//!     public Dictionary<T, Node> Children;
//!     public Node Fail;          // may be null, cycles back to root
//!     public Node Alternative;   // may be null
//! }
//! ```
//!
//! In Rust the same graph is cyclic (the root fails to itself, deep nodes fail
//! back up the tree), which owned references cannot express. Indices sidestep
//! ownership entirely:
//!
//! ```rust,ignore
//! pub struct Node<T> {
//!     children: HashMap<T, StateId>,
//!     fail: StateId,
//!     alternative: Option<StateId>, // explicit "no link"
//! }
//! ```
//!
//! # Lifecycle
//!
//! [`Automaton::build`] inserts every pattern into a trie and then links
//! failure and alternative edges in one breadth-first pass. After that the
//! automaton is never mutated: it exposes no `&mut self` methods, so a shared
//! reference can be handed to any number of threads, each driving its own
//! [`StateId`] through [`Automaton::step`].
//!
//! ```
//! use acautomata::Automaton;
//!
//! let patterns = vec!["he".chars().collect::<Vec<_>>(), "she".chars().collect()];
//! let automaton = Automaton::build(&patterns);
//!
//! let input: Vec<char> = "ushers".chars().collect();
//! assert_eq!(automaton.counts_by_pattern(&input), vec![1, 1]);
//! ```

mod builder;
mod cursor;
mod dot;
mod scan;
mod transition;

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

pub use cursor::Cursor;
pub use transition::Step;

/// Identity of one automaton state; also its index in node storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct StateId(usize);

impl StateId {
    /// The root state. Every scan starts here.
    pub const ROOT: StateId = StateId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl Default for StateId {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marks a node as the end of a pattern.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Terminal {
    /// Index of the pattern in the list the automaton was built from
    pub pattern: usize,
    /// Pattern length minus one. A match ending at position `i` starts at
    /// `i - match_len`.
    pub match_len: usize,
}

impl Terminal {
    /// Start offset of a match of this pattern ending at `position`.
    #[inline]
    pub fn start(&self, position: usize) -> usize {
        position - self.match_len
    }
}

/// One state of the automaton.
#[derive(Clone, Debug)]
pub struct Node<T> {
    id: StateId,
    atom: Option<T>,
    children: HashMap<T, StateId>,
    fail: StateId,
    alternative: Option<StateId>,
    terminal: Option<Terminal>,
}

impl<T: Eq + Hash> Node<T> {
    fn new(id: StateId, atom: Option<T>) -> Self {
        Self {
            id,
            atom,
            children: HashMap::new(),
            fail: StateId::ROOT,
            alternative: None,
            terminal: None,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// The atom consumed to reach this node; `None` for the root.
    pub fn atom(&self) -> Option<&T> {
        self.atom.as_ref()
    }

    /// Child reached by consuming `atom`, if the trie has one.
    #[inline]
    pub fn child(&self, atom: &T) -> Option<StateId> {
        self.children.get(atom).copied()
    }

    pub fn children(&self) -> impl Iterator<Item = (&T, StateId)> {
        self.children.iter().map(|(atom, &id)| (atom, id))
    }

    /// Node of the longest proper suffix of this node's path that is also a
    /// path from the root.
    pub fn fail(&self) -> StateId {
        self.fail
    }

    /// Nearest node on the failure chain that ends a pattern.
    pub fn alternative(&self) -> Option<StateId> {
        self.alternative
    }

    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }

    pub fn is_match(&self) -> bool {
        self.terminal.is_some()
    }
}

/// An immutable Aho-Corasick automaton over atoms of type `T`.
#[derive(Clone, Debug)]
pub struct Automaton<T> {
    nodes: Vec<Node<T>>,
    pattern_count: usize,
}

impl<T: Eq + Hash + Clone> Automaton<T> {
    /// Number of states, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no pattern contributed a node, leaving only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of patterns the automaton was built from, empty ones included.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[StateId::ROOT.index()]
    }

    /// Looks up a node. Every `StateId` handed out by this automaton is valid.
    pub fn node(&self, id: StateId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.iter()
    }

    /// Walks the alternative chain starting at `id`, longest match first.
    pub fn alternatives(&self, id: StateId) -> impl Iterator<Item = &Node<T>> + '_ {
        std::iter::successors(self.node(id).alternative.map(|alt| self.node(alt)), |node| {
            node.alternative.map(|alt| self.node(alt))
        })
    }
}
