use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{trace, warn};

use super::matcher::PatternMatcher;
use crate::config::EncodingMode;
use crate::errors::{ScanError, ScanResult};
use crate::metrics::ScanMetrics;
use crate::results::InputResult;

const BUFFER_CAPACITY: usize = 65536;
pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Decodes bytes according to the encoding mode, borrowing when they are
/// already valid UTF-8
fn decode_bytes<'a>(
    bytes: &'a [u8],
    path: &Path,
    encoding_mode: EncodingMode,
) -> ScanResult<Cow<'a, str>> {
    match encoding_mode {
        EncodingMode::FailFast => match std::str::from_utf8(bytes) {
            Ok(valid) => Ok(Cow::Borrowed(valid)),
            // Only the error path pays for the copy needed to build a FromUtf8Error
            Err(_) => String::from_utf8(bytes.to_vec())
                .map(Cow::Owned)
                .map_err(|e| ScanError::encoding_error(path, e)),
        },
        EncodingMode::Lossy => {
            let cow = String::from_utf8_lossy(bytes);
            if let Cow::Owned(_) = cow {
                warn!("Invalid UTF-8 replaced in file: {}", path.display());
            }
            Ok(cow)
        }
    }
}

/// Reads input files and runs them through the matcher
#[derive(Debug)]
pub struct InputProcessor<'m> {
    matcher: &'m PatternMatcher,
    metrics: ScanMetrics,
    encoding_mode: EncodingMode,
    counts_only: bool,
}

impl<'m> InputProcessor<'m> {
    pub fn new(
        matcher: &'m PatternMatcher,
        metrics: ScanMetrics,
        encoding_mode: EncodingMode,
        counts_only: bool,
    ) -> Self {
        Self {
            matcher,
            metrics,
            encoding_mode,
            counts_only,
        }
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Scans one file from the root state
    pub fn process_file(&self, path: &Path) -> ScanResult<InputResult> {
        trace!("Processing file: {}", path.display());

        let size = match path.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => return Err(ScanError::from_io(path, e)),
        };

        let result = if size >= LARGE_FILE_THRESHOLD {
            let file = File::open(path).map_err(|e| ScanError::from_io(path, e))?;
            // SAFETY: the map is read-only and dropped before this call returns.
            let mmap = unsafe { Mmap::map(&file) }.map_err(ScanError::IoError)?;
            self.metrics.record_read(mmap.len() as u64, true);
            self.process_bytes(path, &mmap)?
        } else {
            let file = File::open(path).map_err(|e| ScanError::from_io(path, e))?;
            let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
            let mut bytes = Vec::with_capacity(size as usize);
            reader.read_to_end(&mut bytes).map_err(ScanError::IoError)?;
            self.metrics.record_read(bytes.len() as u64, false);
            self.process_bytes(path, &bytes)?
        };

        self.metrics
            .record_input(result.atoms as u64, result.total_matches() as u64);
        Ok(result)
    }

    fn process_bytes(&self, path: &Path, bytes: &[u8]) -> ScanResult<InputResult> {
        let source = path.display().to_string();
        if let Some(result) = self.matcher.scan_bytes(&source, bytes, self.counts_only) {
            return Ok(result);
        }
        let text = decode_bytes(bytes, path, self.encoding_mode)?;
        Ok(self.matcher.scan_text(&source, &text, self.counts_only))
    }

    /// Scans text that is already in memory
    pub fn process_text(&self, source: &str, text: &str) -> InputResult {
        let result = self.matcher.scan_text(source, text, self.counts_only);
        self.metrics
            .record_input(result.atoms as u64, result.total_matches() as u64);
        result
    }
}
