mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter};

use anyhow::Result;
use mhash_core::{HashAlgorithm, HashResult};
use std::path::PathBuf;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// A successfully hashed file, ready for display
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: HashResult,
}

impl FileReport {
    pub fn new(path: PathBuf, result: HashResult) -> Self {
        Self { path, result }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a single result
    fn format_single(&self, report: &FileReport) -> Result<String>;

    /// Format a batch of results
    fn format_batch(&self, reports: &[FileReport]) -> Result<String> {
        let formatted: Result<Vec<String>> =
            reports.iter().map(|r| self.format_single(r)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter printing `algorithms`, in that order
pub fn create_formatter(
    format: OutputFormat,
    use_color: bool,
    algorithms: &[HashAlgorithm],
) -> Box<dyn OutputFormatter> {
    let algorithms = algorithms.to_vec();
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color, algorithms)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true, algorithms)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(algorithms)),
    }
}
