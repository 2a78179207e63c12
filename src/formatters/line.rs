use crate::error::FormatError;
use crate::formatters::{DisplayEntry, EntryFormatter};

pub const DEFAULT_LABEL: &str = "JS Proof!";

/// The plain human-readable flow line:
/// `<label> source=<host>:<port>, dest=<host>:<port>, bytes=<n>`
pub struct LineFormatter {
    label: String,
}

impl LineFormatter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl EntryFormatter for LineFormatter {
    fn format_entry(&self, display: &DisplayEntry) -> Result<String, FormatError> {
        let entry = display.entry;
        Ok(format!(
            "{} source={}:{}, dest={}:{}, bytes={}",
            self.label,
            display.source_host,
            entry.source_port,
            display.dest_host,
            entry.dest_port,
            entry.byte_count
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowEntry;

    #[test]
    fn test_default_line() {
        let entry = FlowEntry::new("a.example.com", 80, "b.example.com", 443, 1500);
        let display = DisplayEntry::new(&entry, &entry.source_host, &entry.dest_host);

        assert_eq!(
            LineFormatter::default().format_entry(&display).unwrap(),
            "JS Proof! source=a.example.com:80, dest=b.example.com:443, bytes=1500"
        );
    }

    #[test]
    fn test_custom_label_and_resolved_names() {
        let entry = FlowEntry::new("10.0.0.1", 5353, "10.0.0.2", 53, 0);
        let display = DisplayEntry::new(&entry, "ns.internal", "10.0.0.2");

        assert_eq!(
            LineFormatter::new("flow").format_entry(&display).unwrap(),
            "flow source=ns.internal:5353, dest=10.0.0.2:53, bytes=0"
        );
    }

    #[test]
    fn test_marker_is_verbatim() {
        assert_eq!(
            LineFormatter::default().format_marker("This is the config"),
            "This is the config"
        );
    }
}
