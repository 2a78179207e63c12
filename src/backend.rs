use crate::error::ProcessingError;
use crate::flow::FlowRecord;
use std::io::Write;

/// Outcome of handing one record to a backend
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub lines_written: usize,
    pub entries_failed: usize,
}

/// The two calls a collector makes on a logging backend.
///
/// `initialize` runs once before the first record; `write` runs once per
/// reporting interval. Calls never overlap. The sink is borrowed only for
/// the duration of each call.
pub trait FlowBackend {
    fn initialize(
        &mut self,
        config: Option<&serde_yaml::Value>,
        sink: &mut dyn Write,
    ) -> Result<(), ProcessingError>;

    fn write(
        &mut self,
        record: &FlowRecord,
        sink: &mut dyn Write,
    ) -> Result<WriteSummary, ProcessingError>;
}
