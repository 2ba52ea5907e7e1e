//! Scanning files with one shared automaton, in parallel.
//!
//! # .NET vs Rust Parallel Scanning
//!
//! In .NET, scanning many files against one matcher might look like:
//! ```csharp
//! var results = files.AsParallel()
//!     .Select(file => matcher.Scan(File.ReadAllText(file)))
//!     .ToList();
//! ```
//! and it is up to the reader of `matcher.Scan` to check that it keeps no
//! per-call state in fields.
//!
//! In Rust the automaton is borrowed immutably by every worker, and the scan
//! state is a `StateId` local to each call, so the compiler checks that the
//! sharing is sound:
//! ```rust,ignore
//! let results: Vec<_> = files.par_iter()
//!     .map(|file| processor.process_file(file))
//!     .collect();
//! ```
//!
//! # Reading Strategy
//!
//! Files of 10MB or more are memory mapped; smaller files are read through a
//! buffered reader. Text atom kinds decode the bytes as UTF-8 first, byte
//! atoms scan the raw bytes.
pub mod engine;
pub mod matcher;
pub mod processor;

pub use engine::{scan_text, search, TEXT_SOURCE};
pub use matcher::{AtomAutomaton, PatternMatcher};
pub use processor::InputProcessor;
