use crate::backend::{FlowBackend, WriteSummary};
use crate::error::ProcessingError;
use crate::flow::FlowRecord;
use crate::formatters::line::LineFormatter;
use crate::formatters::{DisplayEntry, EntryFormatter};
use crate::resolver::{HostResolver, RawResolver};
use crate::settings::Settings;
use std::io::Write;
use tracing::{debug, info, warn};

pub const STARTUP_MARKER: &str = "This is the config";
pub const UNKNOWN_HOST: &str = "unknown";

/// Renders every flow of a record as one line and writes it to the sink.
pub struct FlowRecordFormatter {
    formatter: Box<dyn EntryFormatter>,
    resolver: Box<dyn HostResolver>,
    startup_marker: Option<String>,
}

impl Default for FlowRecordFormatter {
    fn default() -> Self {
        Self::new(Box::new(LineFormatter::default()), Box::new(RawResolver))
    }
}

impl FlowRecordFormatter {
    pub fn new(formatter: Box<dyn EntryFormatter>, resolver: Box<dyn HostResolver>) -> Self {
        FlowRecordFormatter {
            formatter,
            resolver,
            startup_marker: Some(STARTUP_MARKER.to_string()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.format.formatter(&settings.label),
            settings.build_resolver(),
        )
        .with_startup_marker(settings.startup_marker.clone())
    }

    /// Replace the marker emitted by `initialize`; `None` emits nothing
    pub fn with_startup_marker(mut self, marker: Option<String>) -> Self {
        self.startup_marker = marker;
        self
    }

    /// Display name for a host field, falling back to the raw text
    fn display_host(&self, host: &str) -> String {
        if host.trim().is_empty() {
            return UNKNOWN_HOST.to_string();
        }
        let name = match self.resolver.resolve(host) {
            Ok(name) if !name.is_empty() => name,
            Ok(_) => host.to_string(),
            Err(e) => {
                debug!(host, error = %e, "host resolution failed, using raw address");
                host.to_string()
            }
        };
        escape_control(&name)
    }
}

/// Render control characters as escapes so one flow stays on one line
fn escape_control(text: &str) -> String {
    if !text.chars().any(char::is_control) {
        return text.to_string();
    }
    text.chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

impl FlowBackend for FlowRecordFormatter {
    fn initialize(
        &mut self,
        config: Option<&serde_yaml::Value>,
        sink: &mut dyn Write,
    ) -> Result<(), ProcessingError> {
        let has_config = config.is_some_and(|value| !value.is_null());
        info!(has_config, "flow formatter initialized");

        if let Some(ref marker) = self.startup_marker {
            writeln!(sink, "{}", self.formatter.format_marker(marker))?;
        }
        sink.flush()?;
        Ok(())
    }

    fn write(
        &mut self,
        record: &FlowRecord,
        sink: &mut dyn Write,
    ) -> Result<WriteSummary, ProcessingError> {
        let mut summary = WriteSummary::default();

        for (index, entry) in record.flows.iter().enumerate() {
            let source = self.display_host(&entry.source_host);
            let dest = self.display_host(&entry.dest_host);
            let display = DisplayEntry::new(entry, &source, &dest);

            match self.formatter.format_entry(&display) {
                Ok(line) => {
                    writeln!(sink, "{}", line)?;
                    summary.lines_written += 1;
                }
                Err(e) => {
                    warn!(index, error = %e, "skipping flow that could not be formatted");
                    summary.entries_failed += 1;
                }
            }
        }

        sink.flush()?;
        Ok(summary)
    }
}
