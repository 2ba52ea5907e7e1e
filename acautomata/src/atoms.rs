//! Splitting text into atoms.
//!
//! The automaton works over any `Eq + Hash` atom type. Text inputs are turned
//! into one of three atom sequences before scanning, and the patterns must be
//! split the same way so that both sides speak the same alphabet.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ScanError;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// How text is split into atoms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomKind {
    /// One atom per Unicode scalar value
    #[default]
    Char,
    /// One atom per byte; inputs are never decoded
    Byte,
    /// One atom per run of word characters (`\w+`); everything else separates
    Word,
}

impl AtomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomKind::Char => "char",
            AtomKind::Byte => "byte",
            AtomKind::Word => "word",
        }
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtomKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "char" | "chars" => Ok(AtomKind::Char),
            "byte" | "bytes" => Ok(AtomKind::Byte),
            "word" | "words" => Ok(AtomKind::Word),
            other => Err(ScanError::config_error(format!(
                "Unknown atom kind '{}' (expected char, byte or word)",
                other
            ))),
        }
    }
}

pub fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

pub fn bytes(text: &[u8]) -> Vec<u8> {
    text.to_vec()
}

pub fn words(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
