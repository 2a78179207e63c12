/// Configuration for stream behavior
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub error_strategy: ErrorStrategy,
    pub max_line_length: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            error_strategy: ErrorStrategy::Skip,
            max_line_length: 1048576, // 1MB
        }
    }
}

/// What to do with an input line that is not a valid flow record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStrategy {
    /// Treat it as an empty record and continue
    Skip,
    /// Stop processing on first error
    FailFast,
}
