use acautomata::{
    atoms, search::PatternMatcher, AtomKind, Automaton, CliOverrides, EncodingMode, ScanConfig,
    ScanError, ScanOutput,
};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::{num::NonZeroUsize, path::PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, ScanError>;

const DEMO_PATTERNS: [&str; 5] = ["i", "in", "tin", "pin", "string"];
const DEMO_INPUT: &str = "pinpiiistringingting";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file layered over the default locations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [default: warn]
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Args)]
struct CliScanConfig {
    /// Pattern to match (can be specified multiple times)
    #[arg(short = 'p', long = "pattern")]
    patterns: Vec<String>,

    /// Files or directories to scan; stdin when none and no --text
    inputs: Vec<PathBuf>,

    /// Scan this text instead of files
    #[arg(short, long, conflicts_with = "inputs")]
    text: Option<String>,

    /// How to split patterns and inputs into atoms (char|byte|word) [default: char]
    #[arg(short, long)]
    atoms: Option<AtomKind>,

    /// Patterns to ignore while walking directories (glob format)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// How to handle invalid UTF-8 sequences (failfast|lossy) [default: failfast]
    #[arg(long)]
    encoding: Option<EncodingMode>,

    /// Show only totals, not per-input results
    #[arg(short, long)]
    stats: bool,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CliDotConfig {
    /// Pattern to include (can be specified multiple times)
    #[arg(short = 'p', long = "pattern", required = true)]
    patterns: Vec<String>,

    /// How to split patterns into atoms (char|byte|word)
    #[arg(short, long, default_value = "char")]
    atoms: AtomKind,
}

#[derive(Subcommand)]
enum Commands {
    /// Count occurrences of each pattern
    Count(Box<CliScanConfig>),

    /// List the start offset of every occurrence of each pattern
    Offsets(Box<CliScanConfig>),

    /// Print the automaton as a Graphviz digraph
    Dot(CliDotConfig),

    /// Build a small automaton, print its graph and count matches
    Demo,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Report {
    Counts,
    Offsets,
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Count(config) => scan(&config, cli.config, cli.log_level, Report::Counts),
        Commands::Offsets(config) => scan(&config, cli.config, cli.log_level, Report::Offsets),
        Commands::Dot(config) => {
            init_tracing(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));
            let matcher = PatternMatcher::new(config.patterns, config.atoms);
            debug!("Built automaton for {} patterns", matcher.len());
            print!("{}", matcher.to_dot());
            Ok(())
        }
        Commands::Demo => {
            init_tracing(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));
            demo();
            Ok(())
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn scan(
    config: &CliScanConfig,
    config_path: Option<PathBuf>,
    log_level: Option<String>,
    report: Report,
) -> Result<()> {
    let cli_config = CliOverrides {
        patterns: config.patterns.clone(),
        inputs: config.inputs.clone(),
        atom_kind: config.atoms,
        ignore_patterns: config.ignore.clone(),
        encoding_mode: config.encoding,
        stats_only: config.stats,
        thread_count: config.threads,
        log_level,
    };

    let scan_config = ScanConfig::load_from(config_path.as_deref())?.merge_with_cli(cli_config);
    init_tracing(&scan_config.log_level);
    debug!("Effective configuration: {:?}", scan_config);

    if scan_config.patterns.is_empty() {
        return Err(ScanError::config_error(
            "At least one pattern (-p) is required",
        ));
    }

    let result = if let Some(text) = &config.text {
        acautomata::scan_text(&scan_config, text)
    } else if scan_config.inputs.is_empty() {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        acautomata::scan_text(&scan_config, &text)
    } else {
        acautomata::search(&scan_config)?
    };

    if config.json {
        println!("{}", result.to_json()?);
    } else {
        print_results(&result, report, scan_config.stats_only);
    }
    Ok(())
}

fn print_results(result: &ScanOutput, report: Report, stats_only: bool) {
    let width = result
        .patterns
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0)
        .max(10);

    if !stats_only {
        for input in &result.input_results {
            println!("\n{}", input.source.blue());
            for (i, pattern) in result.patterns.iter().enumerate() {
                match report {
                    Report::Counts => {
                        println!("{:<width$} {}", pattern, input.counts[i].to_string().green())
                    }
                    Report::Offsets => println!("{:<width$} {:?}", pattern, input.offsets[i]),
                }
            }
        }
        println!();
    }

    if stats_only || result.input_results.len() > 1 {
        println!("{}", "Totals".bold());
        for (pattern, total) in result.patterns.iter().zip(&result.totals) {
            println!("{:<width$} {}", pattern, total.to_string().green());
        }
        println!();
    }

    println!(
        "Found {} matches in {} of {} inputs",
        result.total_matches, result.inputs_with_matches, result.inputs_scanned
    );
}

fn demo() {
    let patterns: Vec<Vec<char>> = DEMO_PATTERNS.iter().map(|p| atoms::chars(p)).collect();
    let automaton = Automaton::build(&patterns);

    println!("{}", automaton.to_dot(|c| c.to_string()));

    let counts = automaton.counts_by_pattern(&atoms::chars(DEMO_INPUT));
    for (pattern, count) in DEMO_PATTERNS.iter().zip(counts) {
        println!("{:<10} {}", pattern, count);
    }
}
