#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Line too long: {length} > {max_length}")]
    LineTooLong { length: usize, max_length: usize },
}

impl ProcessingError {
    /// True when the sink went away underneath us (e.g. `flowlog | head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, ProcessingError::IoError(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// Failure to turn a single flow entry into text. Never aborts a batch.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot format entry: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("lookup of {host} timed out after {timeout:?}")]
    Timeout {
        host: String,
        timeout: std::time::Duration,
    },

    #[error("lookup of {host} failed: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no name known for {0}")]
    NotFound(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error("Invalid duration '{value}': {source}")]
    Duration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}
