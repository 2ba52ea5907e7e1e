//! Deciding which files found under a directory input get scanned.
//!
//! Files named explicitly as inputs are always scanned; these checks only
//! apply to files discovered while walking a directory. Hidden entries and
//! anything matched by `.gitignore` are already dropped by the walker, so no
//! directory names are special here. Everything else is left to the
//! configured ignore globs.
use glob::Pattern;
use std::path::Path;

use crate::atoms::AtomKind;

/// Extensions of formats whose bytes rarely decode as text
const BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "obj", "o", "class", "jar", "png", "jpg", "jpeg", "gif",
    "bmp", "ico", "pdf", "zip", "tar", "gz", "7z", "rar", "wasm",
];

/// True when any ignore glob matches `path`. Separators are normalised to
/// `/` first so globs behave the same on every platform. Malformed globs
/// never match.
pub fn should_ignore(path: &Path, ignore_patterns: &[String]) -> bool {
    let candidate = path.to_string_lossy().replace('\\', "/");
    ignore_patterns
        .iter()
        .filter_map(|glob| Pattern::new(glob).ok())
        .any(|glob| glob.matches(&candidate))
}

pub fn is_likely_binary(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| BINARY_EXTENSIONS.iter().any(|b| b.eq_ignore_ascii_case(ext)))
}

/// Determines if a discovered file should be scanned. Binary files are only
/// worth scanning when atoms are bytes.
pub fn should_scan_file(path: &Path, ignore_patterns: &[String], atom_kind: AtomKind) -> bool {
    (atom_kind == AtomKind::Byte || !is_likely_binary(path)) && !should_ignore(path, ignore_patterns)
}
