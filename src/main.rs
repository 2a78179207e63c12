use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use flowlog::{
    ErrorStrategy, FlowBackend, FlowRecordFormatter, OutputFormat, PipelineConfig, RecordStream,
    Settings,
};

#[derive(Parser)]
#[command(name = "flowlog")]
#[command(about = "Format network flow records as log lines")]
#[command(version)]
struct Args {
    /// Input file with one JSON flow record per line (default: stdin)
    #[arg(value_name = "INPUT")]
    input_file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long = "format", value_enum)]
    format: Option<OutputFormat>,

    /// Label printed at the start of every flow line
    #[arg(short = 'l', long)]
    label: Option<String>,

    /// Print addresses as given instead of reverse-resolving them
    #[arg(long)]
    no_resolve: bool,

    /// Longest wait for a single reverse lookup (e.g. 250ms, 1s)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    resolve_timeout: Option<Duration>,

    /// YAML settings file, also handed to the backend at startup
    #[arg(short = 'c', long = "config")]
    config_file: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output_file: Option<PathBuf>,

    /// Do not emit the startup marker
    #[arg(long)]
    no_marker: bool,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Maximum input line length
    #[arg(long, default_value = "1048576")] // 1MB
    max_line_length: usize,

    /// Print processing statistics to stderr when done
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Settings from the config file (if any) with CLI flags layered on top
    fn settings(&self) -> Result<(Settings, Option<serde_yaml::Value>)> {
        let (mut settings, document) = match self.config_file {
            Some(ref path) => {
                let (settings, document) = Settings::load(path)?;
                (settings, Some(document))
            }
            None => (Settings::default(), None),
        };

        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(ref label) = self.label {
            settings.label = label.clone();
        }
        if self.no_resolve {
            settings.resolve = false;
        }
        if let Some(timeout) = self.resolve_timeout {
            settings.resolve_timeout = timeout;
        }
        if self.no_marker {
            settings.startup_marker = None;
        }

        Ok((settings, document))
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("flowlog: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let (settings, document) = args.settings()?;
    tracing::debug!(?settings, "effective settings");

    let mut backend = FlowRecordFormatter::from_settings(&settings);

    let config = PipelineConfig {
        error_strategy: if args.fail_fast {
            ErrorStrategy::FailFast
        } else {
            ErrorStrategy::Skip
        },
        max_line_length: args.max_line_length,
    };
    let mut stream = RecordStream::new(config);

    // Set up input
    let input_filename = args
        .input_file
        .as_ref()
        .map(|p| p.to_string_lossy().to_string());
    let input: Box<dyn BufRead> = match args.input_file {
        Some(ref input_path) => {
            let file = File::open(input_path).with_context(|| {
                format!("Failed to open input file '{}'", input_path.display())
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    // Set up output
    let mut output: Box<dyn Write> = match args.output_file {
        Some(ref output_path) => {
            let file = File::create(output_path).with_context(|| {
                format!("Failed to create output file '{}'", output_path.display())
            })?;
            Box::new(io::BufWriter::new(file))
        }
        None => Box::new(io::BufWriter::new(io::stdout())),
    };

    backend
        .initialize(document.as_ref(), &mut output)
        .context("Failed to initialize backend")?;

    let stats = stream
        .process_stream(&mut backend, input, &mut output, input_filename.as_deref())
        .context("Processing failed")?;

    output.flush()?;

    if args.stats {
        eprintln!("Final statistics:");
        eprintln!("  Records read: {}", stats.records_read);
        eprintln!("  Malformed records: {}", stats.records_malformed);
        eprintln!("  Lines written: {}", stats.lines_written);
        eprintln!("  Failed entries: {}", stats.entries_failed);
        eprintln!("  Processing time: {:?}", stats.processing_time);
    }

    Ok(())
}
