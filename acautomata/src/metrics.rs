use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Counters shared by every thread taking part in one search
#[derive(Debug, Clone, Default)]
pub struct ScanMetrics {
    inputs_scanned: Arc<AtomicU64>,
    inputs_skipped: Arc<AtomicU64>,
    atoms_scanned: Arc<AtomicU64>,
    matches_reported: Arc<AtomicU64>,
    bytes_read: Arc<AtomicU64>,
    mmap_inputs: Arc<AtomicU64>,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one scanned input
    pub fn record_input(&self, atoms: u64, matches: u64) {
        self.inputs_scanned.fetch_add(1, Ordering::Relaxed);
        self.atoms_scanned.fetch_add(atoms, Ordering::Relaxed);
        self.matches_reported.fetch_add(matches, Ordering::Relaxed);
    }

    /// Records an input that could not be read and was left out
    pub fn record_skipped(&self) {
        self.inputs_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records bytes read from disk, noting whether they were memory mapped
    pub fn record_read(&self, bytes: u64, mapped: bool) {
        let total = self.bytes_read.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if mapped {
            self.mmap_inputs.fetch_add(1, Ordering::Relaxed);
        }
        debug!("Read {} bytes (mapped: {}), total: {} bytes", bytes, mapped, total);
    }

    pub fn snapshot(&self) -> ScanStats {
        ScanStats {
            inputs_scanned: self.inputs_scanned.load(Ordering::Relaxed),
            inputs_skipped: self.inputs_skipped.load(Ordering::Relaxed),
            atoms_scanned: self.atoms_scanned.load(Ordering::Relaxed),
            matches_reported: self.matches_reported.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            mmap_inputs: self.mmap_inputs.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.snapshot();
        info!(
            "Scan stats:\n\
             Inputs scanned/skipped: {}/{}\n\
             Atoms scanned: {}\n\
             Matches reported: {}\n\
             Bytes read: {} ({} inputs memory mapped)",
            stats.inputs_scanned,
            stats.inputs_skipped,
            stats.atoms_scanned,
            stats.matches_reported,
            stats.bytes_read,
            stats.mmap_inputs
        );
    }
}

/// Point-in-time copy of [`ScanMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub inputs_scanned: u64,
    pub inputs_skipped: u64,
    pub atoms_scanned: u64,
    pub matches_reported: u64,
    pub bytes_read: u64,
    pub mmap_inputs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_tracking() {
        let metrics = ScanMetrics::new();
        metrics.record_input(100, 3);
        metrics.record_input(50, 0);
        metrics.record_skipped();

        let stats = metrics.snapshot();
        assert_eq!(stats.inputs_scanned, 2);
        assert_eq!(stats.inputs_skipped, 1);
        assert_eq!(stats.atoms_scanned, 150);
        assert_eq!(stats.matches_reported, 3);
    }

    #[test]
    fn test_read_tracking() {
        let metrics = ScanMetrics::new();
        metrics.record_read(1000, false);
        metrics.record_read(20_000_000, true);

        let stats = metrics.snapshot();
        assert_eq!(stats.bytes_read, 20_001_000);
        assert_eq!(stats.mmap_inputs, 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = ScanMetrics::new();
        let clone = metrics.clone();
        clone.record_input(10, 1);
        assert_eq!(metrics.snapshot().inputs_scanned, 1);
    }
}
