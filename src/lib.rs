// src/lib.rs
pub mod backend;
pub mod error;
pub mod flow;
pub mod formatters;
pub mod output_format;
pub mod pipeline;
pub mod record_formatter;
pub mod resolver;
pub mod settings;

pub use error::*;

pub use backend::{FlowBackend, WriteSummary};
pub use flow::{FlowEntry, FlowRecord};
pub use formatters::{DisplayEntry, EntryFormatter};
pub use output_format::OutputFormat;
pub use pipeline::config::{ErrorStrategy, PipelineConfig};
pub use pipeline::context::ProcessingStats;
pub use pipeline::stream::RecordStream;
pub use record_formatter::FlowRecordFormatter;
pub use resolver::{DnsResolver, HostResolver, RawResolver, StaticResolver};
pub use settings::Settings;
