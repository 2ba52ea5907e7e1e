use std::hash::Hash;
use tracing::debug;

use crate::atoms::{self, AtomKind};
use crate::automaton::Automaton;
use crate::results::InputResult;

/// An automaton over whichever atom type the patterns were split into
#[derive(Debug, Clone)]
pub enum AtomAutomaton {
    Char(Automaton<char>),
    Byte(Automaton<u8>),
    Word(Automaton<String>),
}

/// Text patterns compiled into one automaton
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<String>,
    automaton: AtomAutomaton,
}

impl PatternMatcher {
    /// Splits every pattern into atoms of `kind` and builds the automaton
    pub fn new(patterns: Vec<String>, kind: AtomKind) -> Self {
        let automaton = match kind {
            AtomKind::Char => {
                let split: Vec<Vec<char>> = patterns.iter().map(|p| atoms::chars(p)).collect();
                AtomAutomaton::Char(Automaton::build(&split))
            }
            AtomKind::Byte => {
                let split: Vec<Vec<u8>> =
                    patterns.iter().map(|p| atoms::bytes(p.as_bytes())).collect();
                AtomAutomaton::Byte(Automaton::build(&split))
            }
            AtomKind::Word => {
                let split: Vec<Vec<String>> = patterns.iter().map(|p| atoms::words(p)).collect();
                AtomAutomaton::Word(Automaton::build(&split))
            }
        };
        debug!(
            "Compiled {} patterns as {} atoms into {} states",
            patterns.len(),
            kind,
            Self::state_count(&automaton)
        );

        Self {
            patterns,
            automaton,
        }
    }

    fn state_count(automaton: &AtomAutomaton) -> usize {
        match automaton {
            AtomAutomaton::Char(a) => a.len(),
            AtomAutomaton::Byte(a) => a.len(),
            AtomAutomaton::Word(a) => a.len(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn automaton(&self) -> &AtomAutomaton {
        &self.automaton
    }

    pub fn atom_kind(&self) -> AtomKind {
        match self.automaton {
            AtomAutomaton::Char(_) => AtomKind::Char,
            AtomAutomaton::Byte(_) => AtomKind::Byte,
            AtomAutomaton::Word(_) => AtomKind::Word,
        }
    }

    /// Number of automaton states, root included
    pub fn len(&self) -> usize {
        Self::state_count(&self.automaton)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Scans decoded text. Byte matchers scan its UTF-8 encoding.
    pub fn scan_text(&self, source: &str, text: &str, counts_only: bool) -> InputResult {
        match &self.automaton {
            AtomAutomaton::Char(a) => scan(a, source, &atoms::chars(text), counts_only),
            AtomAutomaton::Byte(a) => scan(a, source, text.as_bytes(), counts_only),
            AtomAutomaton::Word(a) => scan(a, source, &atoms::words(text), counts_only),
        }
    }

    /// Scans raw bytes. Only valid for byte matchers; text matchers go
    /// through [`PatternMatcher::scan_text`] after decoding.
    pub fn scan_bytes(&self, source: &str, bytes: &[u8], counts_only: bool) -> Option<InputResult> {
        match &self.automaton {
            AtomAutomaton::Byte(a) => Some(scan(a, source, bytes, counts_only)),
            _ => None,
        }
    }

    /// Graphviz rendering of the compiled automaton
    pub fn to_dot(&self) -> String {
        match &self.automaton {
            AtomAutomaton::Char(a) => a.to_dot(|c| c.to_string()),
            AtomAutomaton::Byte(a) => a.to_dot(|&b| byte_label(b)),
            AtomAutomaton::Word(a) => a.to_dot(|w| w.clone()),
        }
    }
}

fn byte_label(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        (byte as char).to_string()
    } else {
        format!("\\x{:02x}", byte)
    }
}

fn scan<T: Eq + Hash + Clone>(
    automaton: &Automaton<T>,
    source: &str,
    input: &[T],
    counts_only: bool,
) -> InputResult {
    let (counts, offsets) = if counts_only {
        (
            automaton.counts_by_pattern(input),
            vec![Vec::new(); automaton.pattern_count()],
        )
    } else {
        let offsets = automaton.occurrences_by_offset(input);
        (offsets.iter().map(Vec::len).collect(), offsets)
    };

    InputResult {
        source: source.to_string(),
        atoms: input.len(),
        counts,
        offsets,
    }
}
