// src/pipeline/stream.rs
use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{debug, warn};

use crate::backend::FlowBackend;
use crate::error::ProcessingError;
use crate::flow::FlowRecord;
use crate::pipeline::config::{ErrorStrategy, PipelineConfig};
use crate::pipeline::context::ProcessingStats;

/// Drives a backend the way a collector would: one record per input line,
/// handed over in order, one call at a time.
pub struct RecordStream {
    config: PipelineConfig,
    stats: ProcessingStats,
}

impl RecordStream {
    pub fn new(config: PipelineConfig) -> Self {
        RecordStream {
            config,
            stats: ProcessingStats::default(),
        }
    }

    /// Process a single file/stream of JSON flow records
    pub fn process_stream<R: BufRead, W: Write>(
        &mut self,
        backend: &mut dyn FlowBackend,
        mut input: R,
        output: &mut W,
        filename: Option<&str>,
    ) -> Result<ProcessingStats, ProcessingError> {
        let start_time = Instant::now();
        let mut file_stats = ProcessingStats::default();
        let source = filename.unwrap_or("<stdin>");
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ProcessingError::IoError(e)),
            }
            line_number += 1;

            let record = match self.decode_line(&buf, line_number) {
                Ok(None) => continue,
                Ok(Some(record)) => {
                    file_stats.records_read += 1;
                    record
                }
                Err(error) => {
                    file_stats.records_read += 1;
                    match self.config.error_strategy {
                        ErrorStrategy::FailFast => return Err(error),
                        ErrorStrategy::Skip => {
                            file_stats.records_malformed += 1;
                            warn!(source, line = line_number, %error, "treating malformed record as empty");
                            continue;
                        }
                    }
                }
            };

            match backend.write(&record, &mut *output) {
                Ok(summary) => file_stats.add_summary(summary),
                Err(e) if e.is_broken_pipe() => {
                    debug!(source, "output closed, stopping");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        file_stats.processing_time = start_time.elapsed();
        self.stats.merge(&file_stats);

        Ok(file_stats)
    }

    /// Decode one raw input line; `None` for blank lines
    fn decode_line(
        &self,
        raw: &[u8],
        line_number: usize,
    ) -> Result<Option<FlowRecord>, ProcessingError> {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        if raw.len() > self.config.max_line_length {
            return Err(ProcessingError::LineTooLong {
                length: raw.len(),
                max_length: self.config.max_line_length,
            });
        }

        let line = std::str::from_utf8(raw).map_err(|e| ProcessingError::ParseError {
            line: line_number,
            message: format!("invalid UTF-8: {}", e),
        })?;
        if line.trim().is_empty() {
            return Ok(None);
        }

        FlowRecord::from_json(line)
            .map(Some)
            .map_err(|e| ProcessingError::ParseError {
                line: line_number,
                message: e.to_string(),
            })
    }

    /// Get current accumulated stats
    pub fn get_stats(&self) -> &ProcessingStats {
        &self.stats
    }
}
