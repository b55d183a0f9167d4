//! CLI argument parsing for applyprof

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the latency report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "applyprof")]
#[command(version)]
#[command(
    about = "Attribute apply time to resources, providers and resource types",
    long_about = "Reads the JSON event stream of an apply run (e.g. `terraform apply -json`) \
                  and reports the slowest resource addresses, providers and resource types."
)]
pub struct Cli {
    /// Input file with one JSON record per line (default: stdin, or `-`)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Number of entries shown per report block
    #[arg(short = 'n', long = "top", value_name = "N", default_value_t = crate::report::DEFAULT_TOP_N)]
    pub top: usize,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Input path, or `None` for stdin
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
