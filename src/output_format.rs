use crate::formatters::jsonl::JsonlFormatter;
use crate::formatters::line::LineFormatter;
use crate::formatters::logfmt::LogfmtFormatter;
use crate::formatters::xml::XmlFormatter;
use crate::formatters::EntryFormatter;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[value(name = "line", help = "Human-readable flow lines (label source=... dest=... bytes=...)")]
    Line,
    #[value(name = "logfmt", help = "Logfmt format (key=value pairs)")]
    Logfmt,
    #[value(name = "jsonl", help = "JSON Lines format (one JSON object per flow)")]
    Jsonl,
    #[value(name = "xml", help = "One <flow> XML element per flow")]
    Xml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(OutputFormat::Line),
            "logfmt" => Ok(OutputFormat::Logfmt),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl OutputFormat {
    /// Build the entry formatter for this format
    pub fn formatter(&self, label: &str) -> Box<dyn EntryFormatter> {
        match self {
            OutputFormat::Line => Box::new(LineFormatter::new(label)),
            OutputFormat::Logfmt => Box::new(LogfmtFormatter::new(label)),
            OutputFormat::Jsonl => Box::new(JsonlFormatter::new(label)),
            OutputFormat::Xml => Box::new(XmlFormatter::new()),
        }
    }
}
