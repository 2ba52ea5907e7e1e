pub mod atoms;
pub mod automaton;
pub mod config;
pub mod errors;
pub mod filters;
pub mod metrics;
pub mod results;
pub mod search;

pub use atoms::AtomKind;
pub use automaton::{Automaton, Cursor, Node, StateId, Step, Terminal};
pub use config::{CliOverrides, EncodingMode, ScanConfig};
pub use errors::{ScanError, ScanResult};
pub use metrics::{ScanMetrics, ScanStats};
pub use results::{InputResult, ScanOutput};
pub use search::{scan_text, search};
