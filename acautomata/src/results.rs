//! Result types for scans.
//!
//! Every per-pattern vector here is indexed like the pattern list the
//! automaton was built from.
use serde::Serialize;

use crate::errors::ScanResult;

/// Matches found in one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputResult {
    /// Path of the input, or a placeholder for in-memory text
    pub source: String,
    /// Number of atoms the input was split into
    pub atoms: usize,
    /// Occurrences per pattern
    pub counts: Vec<usize>,
    /// Start offsets (in atoms) per pattern, ascending
    pub offsets: Vec<Vec<usize>>,
}

impl InputResult {
    pub fn total_matches(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Results of a whole scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanOutput {
    pub patterns: Vec<String>,
    pub input_results: Vec<InputResult>,
    /// Occurrences per pattern summed over every input
    pub totals: Vec<usize>,
    pub total_matches: usize,
    pub inputs_scanned: usize,
    pub inputs_with_matches: usize,
}

impl ScanOutput {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            totals: vec![0; patterns.len()],
            patterns,
            ..Default::default()
        }
    }

    pub fn add_input_result(&mut self, result: InputResult) {
        self.inputs_scanned += 1;
        let matches = result.total_matches();
        if matches > 0 {
            self.total_matches += matches;
            self.inputs_with_matches += 1;
        }
        for (total, count) in self.totals.iter_mut().zip(&result.counts) {
            *total += count;
        }
        self.input_results.push(result);
    }

    /// Merges another output built from the same pattern list
    pub fn merge(&mut self, other: ScanOutput) {
        self.total_matches += other.total_matches;
        self.inputs_scanned += other.inputs_scanned;
        self.inputs_with_matches += other.inputs_with_matches;
        for (total, count) in self.totals.iter_mut().zip(&other.totals) {
            *total += count;
        }
        self.input_results.extend(other.input_results);
    }

    pub fn to_json(&self) -> ScanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
