use crate::error::FormatError;
use crate::formatters::line::DEFAULT_LABEL;
use crate::formatters::{DisplayEntry, EntryFormatter};

/// Logfmt flow formatter (space-separated key=value pairs)
pub struct LogfmtFormatter {
    label: String,
}

impl LogfmtFormatter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Format fields in the given order as standard logfmt
    pub fn format_fields(&self, fields: &[(&str, String)]) -> String {
        fields
            .iter()
            .map(|(key, value)| self.format_key_value_pair(key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format a single key=value pair, quoting the value when needed
    pub fn format_key_value_pair(&self, key: &str, value: &str) -> String {
        if self.needs_quoting(value) {
            format!("{}=\"{}\"", key, self.escape_quotes(value))
        } else {
            format!("{}={}", key, value)
        }
    }

    /// Check if value needs to be quoted per logfmt rules
    fn needs_quoting(&self, value: &str) -> bool {
        value.is_empty()
            || value.contains(' ')
            || value.contains('\t')
            || value.contains('\n')
            || value.contains('\r')
            || value.contains('\\')
            || value.contains('"')
            || value.contains('=')
    }

    /// Escape quotes in values per logfmt rules
    fn escape_quotes(&self, value: &str) -> String {
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
    }
}

impl Default for LogfmtFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl EntryFormatter for LogfmtFormatter {
    fn format_entry(&self, display: &DisplayEntry) -> Result<String, FormatError> {
        let entry = display.entry;
        let mut fields = vec![
            ("label", self.label.clone()),
            (
                "source",
                format!("{}:{}", display.source_host, entry.source_port),
            ),
            ("dest", format!("{}:{}", display.dest_host, entry.dest_port)),
            ("bytes", entry.byte_count.to_string()),
        ];
        fields.extend(entry.extra_attributes());

        Ok(self.format_fields(&fields))
    }

    fn format_marker(&self, marker: &str) -> String {
        self.format_fields(&[("label", self.label.clone()), ("msg", marker.to_string())])
    }
}
