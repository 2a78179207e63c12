use crate::error::FormatError;
use crate::flow::FlowEntry;

/// A flow entry paired with the display names of its endpoints
#[derive(Debug, Clone, Copy)]
pub struct DisplayEntry<'a> {
    pub entry: &'a FlowEntry,
    pub source_host: &'a str,
    pub dest_host: &'a str,
}

impl<'a> DisplayEntry<'a> {
    pub fn new(entry: &'a FlowEntry, source_host: &'a str, dest_host: &'a str) -> Self {
        DisplayEntry {
            entry,
            source_host,
            dest_host,
        }
    }
}

/// Trait for rendering flow entries to single lines (no trailing newline)
pub trait EntryFormatter {
    fn format_entry(&self, display: &DisplayEntry) -> Result<String, FormatError>;

    /// Render the one-time startup marker in this format
    fn format_marker(&self, marker: &str) -> String {
        marker.to_string()
    }
}

pub mod jsonl;
pub mod line;
pub mod logfmt;
pub mod xml;
