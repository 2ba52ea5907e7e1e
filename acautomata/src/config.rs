use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::atoms::AtomKind;
use crate::errors::{ScanError, ScanResult};

/// Configuration for a scan.
///
/// # Configuration Locations
///
/// Files are layered in order of increasing precedence:
/// 1. Global `$HOME/.config/acautomata/config.yaml`
/// 2. Local `.acautomata.yaml` in the current directory
/// 3. Custom config file specified via `--config`
///
/// # Configuration Format
///
/// ```yaml
/// # Patterns to look for, split into atoms the same way as inputs
/// patterns: ["he", "she", "his", "hers"]
///
/// # Files or directories to scan
/// inputs: ["corpus/"]
///
/// # char, byte or word
/// atom_kind: "char"
///
/// # Paths to skip while walking directories (glob syntax)
/// ignore_patterns:
///   - "target/**"
///
/// # failfast or lossy handling of invalid UTF-8
/// encoding_mode: "failfast"
///
/// # Report totals only
/// stats_only: false
///
/// # Thread count (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// Command-line arguments take precedence over file values; see
/// [`ScanConfig::merge_with_cli`] and [`CliOverrides`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Patterns to match; index `i` in every result refers to `patterns[i]`
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Input files or directories
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    /// How patterns and inputs are split into atoms
    #[serde(default)]
    pub atom_kind: AtomKind,

    /// Glob patterns of paths to skip while walking directories
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// How to handle invalid UTF-8 in inputs
    #[serde(default)]
    pub encoding_mode: EncodingMode,

    /// Only report totals instead of per-input results
    #[serde(default)]
    pub stats_only: bool,

    /// Number of threads used to scan inputs in parallel
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// How to handle invalid UTF-8 sequences in text inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Reject the input with an encoding error
    #[default]
    FailFast,
    /// Replace invalid sequences with U+FFFD and keep going
    Lossy,
}

impl FromStr for EncodingMode {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "failfast" | "fail-fast" => Ok(EncodingMode::FailFast),
            "lossy" => Ok(EncodingMode::Lossy),
            other => Err(ScanError::config_error(format!(
                "Unknown encoding mode '{}' (expected failfast or lossy)",
                other
            ))),
        }
    }
}

/// Values given on the command line. `None` and empty lists leave the file
/// value in place; anything set replaces it, even when it equals the default.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub patterns: Vec<String>,
    pub inputs: Vec<PathBuf>,
    pub atom_kind: Option<AtomKind>,
    pub ignore_patterns: Vec<String>,
    pub encoding_mode: Option<EncodingMode>,
    pub stats_only: bool,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            inputs: Vec::new(),
            atom_kind: AtomKind::default(),
            ignore_patterns: Vec::new(),
            encoding_mode: EncodingMode::default(),
            stats_only: false,
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from the default locations
    pub fn load() -> ScanResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus a specific file.
    /// A custom file that does not exist is an error; default locations are
    /// simply skipped when absent.
    pub fn load_from(config_path: Option<&Path>) -> ScanResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let defaults = [
            dirs::config_dir().map(|p| p.join("acautomata/config.yaml")),
            Some(PathBuf::from(".acautomata.yaml")),
        ];
        for path in defaults.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if !cli.patterns.is_empty() {
            self.patterns = cli.patterns;
        }
        if !cli.inputs.is_empty() {
            self.inputs = cli.inputs;
        }
        if let Some(atom_kind) = cli.atom_kind {
            self.atom_kind = atom_kind;
        }
        if !cli.ignore_patterns.is_empty() {
            self.ignore_patterns = cli.ignore_patterns;
        }
        if let Some(encoding_mode) = cli.encoding_mode {
            self.encoding_mode = encoding_mode;
        }
        if cli.stats_only {
            self.stats_only = true;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }
}
