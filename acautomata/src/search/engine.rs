use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::matcher::PatternMatcher;
use super::processor::InputProcessor;
use crate::config::ScanConfig;
use crate::errors::{ScanError, ScanResult};
use crate::filters::should_scan_file;
use crate::metrics::ScanMetrics;
use crate::results::ScanOutput;

/// Label used as the source of in-memory text
pub const TEXT_SOURCE: &str = "<text>";

/// A file to scan and whether the user named it directly
#[derive(Debug, Clone, PartialEq, Eq)]
struct Input {
    path: PathBuf,
    explicit: bool,
}

/// Scans every configured input in parallel against one shared automaton.
///
/// Each input is scanned from the root state independently, so results never
/// depend on how inputs are spread over threads. Results keep the order in
/// which inputs were listed or discovered.
pub fn search(config: &ScanConfig) -> ScanResult<ScanOutput> {
    info!("Starting scan with patterns: {:?}", config.patterns);

    if config.patterns.is_empty() {
        debug!("No patterns provided, returning empty result");
        return Ok(ScanOutput::new(Vec::new()));
    }

    let matcher = PatternMatcher::new(config.patterns.clone(), config.atom_kind);
    let processor = InputProcessor::new(
        &matcher,
        ScanMetrics::new(),
        config.encoding_mode,
        config.stats_only,
    );

    let inputs = collect_inputs(config)?;
    debug!("Found {} inputs to scan", inputs.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build()?;

    let scanned: Vec<ScanResult<Option<_>>> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| match processor.process_file(&input.path) {
                Ok(result) => Ok(Some(result)),
                Err(e) if !input.explicit => {
                    warn!("Skipping {}: {}", input.path.display(), e);
                    processor.metrics().record_skipped();
                    Ok(None)
                }
                Err(e) => Err(e),
            })
            .collect()
    });

    let mut output = ScanOutput::new(config.patterns.clone());
    for result in scanned {
        if let Some(result) = result? {
            output.add_input_result(result);
        }
    }

    processor.metrics().log_stats();
    info!(
        "Scan complete. Found {} matches in {} of {} inputs",
        output.total_matches, output.inputs_with_matches, output.inputs_scanned
    );

    Ok(output)
}

/// Scans a single in-memory text with the configured patterns and atom kind.
/// `config.inputs` is ignored.
pub fn scan_text(config: &ScanConfig, text: &str) -> ScanOutput {
    let mut output = ScanOutput::new(config.patterns.clone());
    if config.patterns.is_empty() {
        return output;
    }

    let matcher = PatternMatcher::new(config.patterns.clone(), config.atom_kind);
    let processor = InputProcessor::new(
        &matcher,
        ScanMetrics::new(),
        config.encoding_mode,
        config.stats_only,
    );
    output.add_input_result(processor.process_text(TEXT_SOURCE, text));
    output
}

/// Expands configured inputs into files. Directories are walked honouring
/// `.gitignore` files and the configured ignore patterns.
fn collect_inputs(config: &ScanConfig) -> ScanResult<Vec<Input>> {
    let mut inputs = Vec::new();

    for root in &config.inputs {
        if root.is_file() {
            inputs.push(Input {
                path: root.clone(),
                explicit: true,
            });
            continue;
        }
        if !root.is_dir() {
            return Err(ScanError::file_not_found(root));
        }

        let mut walker = WalkBuilder::new(root);
        walker
            .hidden(true)
            .ignore(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);

        let mut found: Vec<PathBuf> = walker
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| should_scan_file(path, &config.ignore_patterns, config.atom_kind))
            .collect();
        // Walk order depends on the filesystem
        found.sort();

        inputs.extend(found.into_iter().map(|path| Input {
            path,
            explicit: false,
        }));
    }

    Ok(inputs)
}
