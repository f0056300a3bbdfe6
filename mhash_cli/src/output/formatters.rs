use super::{FileReport, OutputFormatter};
use anyhow::Result;
use colored::*;
use mhash_core::HashAlgorithm;
use serde_json::{Map, Value, json};

/// Text formatter: one `ALGO: digest` line per algorithm
///
/// With more than one file each line is prefixed by the file path, which
/// keeps the output greppable.
pub struct TextFormatter {
    use_color: bool,
    algorithms: Vec<HashAlgorithm>,
}

impl TextFormatter {
    pub fn new(use_color: bool, algorithms: Vec<HashAlgorithm>) -> Self {
        Self {
            use_color,
            algorithms,
        }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn lines(&self, report: &FileReport, with_path: bool) -> String {
        let mut output = String::new();
        for &algorithm in &self.algorithms {
            if with_path {
                output.push_str(&format!("{}: ", report.path.display()));
            }
            let name = self.colorize(algorithm.display_name(), |s| s.yellow());
            let digest = self.colorize(report.result.digest(algorithm), |s| s.cyan());
            output.push_str(&format!("{name}: {digest}\n"));
        }
        output
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, report: &FileReport) -> Result<String> {
        Ok(self.lines(report, false))
    }

    fn format_batch(&self, reports: &[FileReport]) -> Result<String> {
        let with_path = reports.len() > 1;
        Ok(reports.iter().map(|r| self.lines(r, with_path)).collect())
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
    algorithms: Vec<HashAlgorithm>,
}

impl JsonFormatter {
    pub fn new(pretty: bool, algorithms: Vec<HashAlgorithm>) -> Self {
        Self { pretty, algorithms }
    }

    fn to_value(&self, report: &FileReport) -> Value {
        let hashes: Map<String, Value> = self
            .algorithms
            .iter()
            .map(|&algorithm| {
                (
                    algorithm.to_string(),
                    json!(report.result.digest(algorithm)),
                )
            })
            .collect();

        json!({
            "path": report.path.to_string_lossy(),
            "file_size": report.result.file_size,
            "processing_time_ms": report.result.processing_time.as_millis(),
            "hashes": hashes,
        })
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, report: &FileReport) -> Result<String> {
        self.render(&self.to_value(report))
    }

    fn format_batch(&self, reports: &[FileReport]) -> Result<String> {
        match reports {
            [single] => self.format_single(single),
            _ => {
                let values: Vec<Value> = reports.iter().map(|r| self.to_value(r)).collect();
                self.render(&Value::Array(values))
            }
        }
    }
}

/// CSV formatter for tabular output, one row per file
pub struct CsvFormatter {
    algorithms: Vec<HashAlgorithm>,
}

impl CsvFormatter {
    pub fn new(algorithms: Vec<HashAlgorithm>) -> Self {
        Self { algorithms }
    }

    fn headers(&self) -> Vec<String> {
        let mut headers = vec!["path".to_string(), "size".to_string()];
        headers.extend(self.algorithms.iter().map(|a| a.to_string()));
        headers.push("processing_time_ms".to_string());
        headers
    }

    fn record(&self, report: &FileReport) -> Vec<String> {
        let mut record = vec![
            report.path.to_string_lossy().to_string(),
            report.result.file_size.to_string(),
        ];
        record.extend(
            self.algorithms
                .iter()
                .map(|&a| report.result.digest(a).to_string()),
        );
        record.push(report.result.processing_time.as_millis().to_string());
        record
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_single(&self, report: &FileReport) -> Result<String> {
        self.format_batch(std::slice::from_ref(report))
    }

    fn format_batch(&self, reports: &[FileReport]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(self.headers())?;

        for report in reports {
            wtr.write_record(self.record(report))?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}
