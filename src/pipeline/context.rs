use crate::backend::WriteSummary;
use std::time::Duration;

/// Runtime statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessingStats {
    pub records_read: usize,
    pub records_malformed: usize,
    pub lines_written: usize,
    pub entries_failed: usize,
    pub processing_time: Duration,
}

impl ProcessingStats {
    pub fn add_summary(&mut self, summary: WriteSummary) {
        self.lines_written += summary.lines_written;
        self.entries_failed += summary.entries_failed;
    }

    /// Fold another run's counters into this one
    pub fn merge(&mut self, other: &ProcessingStats) {
        self.records_read += other.records_read;
        self.records_malformed += other.records_malformed;
        self.lines_written += other.lines_written;
        self.entries_failed += other.entries_failed;
        self.processing_time += other.processing_time;
    }
}
