use std::fmt::Write;
use std::hash::Hash;

use super::{Automaton, StateId};

const FONT: &str = "Helvetica,Arial,sans-serif";

impl<T: Eq + Hash + Clone> Automaton<T> {
    /// Renders the automaton as a Graphviz `digraph`.
    ///
    /// - Nodes ending a pattern are drawn as double circles.
    /// - Failure links are dashed edges.
    /// - Alternative links are dotted edges.
    /// - Trie transitions are solid edges labelled with `label(atom)`.
    ///
    /// Edges are written in node-id order, so the same automaton always
    /// renders to the same text.
    pub fn to_dot<F>(&self, label: F) -> String
    where
        F: Fn(&T) -> String,
    {
        let mut dot = String::new();
        self.write_dot(&mut dot, label).expect("writing to a String");
        dot
    }

    /// Same output as [`Automaton::to_dot`], written into any
    /// [`std::fmt::Write`] sink.
    pub fn write_dot<W, F>(&self, out: &mut W, label: F) -> std::fmt::Result
    where
        W: Write,
        F: Fn(&T) -> String,
    {
        writeln!(out, "digraph finite_state_machine {{")?;
        writeln!(out, "  fontname=\"{FONT}\"")?;
        writeln!(out, "  node [fontname=\"{FONT}\"]")?;
        writeln!(out, "  edge [fontname=\"{FONT}\"]")?;
        writeln!(out, "  rankdir=LR;")?;

        write!(out, "  node [shape = doublecircle];")?;
        for node in self.nodes.iter().filter(|n| n.is_match()) {
            write!(out, " {}", node.id)?;
        }
        writeln!(out, ";")?;
        writeln!(out, "  node [shape = circle];")?;

        for node in &self.nodes {
            if !node.id.is_root() {
                writeln!(
                    out,
                    "  {} -> {} [style = dashed, constraint=false];",
                    node.id, node.fail
                )?;
            }
            if let Some(alt) = node.alternative {
                writeln!(
                    out,
                    "  {} -> {} [style = dotted, constraint=false];",
                    node.id, alt
                )?;
            }

            let mut children: Vec<(&T, StateId)> = node.children().collect();
            children.sort_unstable_by_key(|&(_, id)| id);
            for (atom, child) in children {
                writeln!(
                    out,
                    "  {} -> {} [label = \"{}\"];",
                    node.id,
                    child,
                    escape(&label(atom))
                )?;
            }
        }

        writeln!(out, "}}")
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
