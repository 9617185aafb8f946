//! Orchestration: Reader -> Transformer -> Writer.

use std::path::PathBuf;

use tracing::info;

use crate::config::RunConfig;
use crate::error::Result;
use crate::reader::{SkippedLine, read_records};
use crate::transform::transform_all;
use crate::writer::write_records;

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub records_read: usize,
    pub records_written: usize,
    /// Lines dropped in skip mode; always empty in abort mode.
    pub skipped: Vec<SkippedLine>,
}

impl RunSummary {
    /// One-line message for a successful run.
    ///
    /// Lines dropped in skip mode are listed by line number.
    pub fn confirmation(&self) -> String {
        let mut msg = format!(
            "Processing complete. Results written to {}",
            self.output_path.display()
        );
        if !self.skipped.is_empty() {
            let lines: Vec<String> = self.skipped.iter().map(|s| s.line.to_string()).collect();
            let noun = if lines.len() == 1 { "line" } else { "lines" };
            msg.push_str(&format!(
                " (skipped {} malformed {noun}: {})",
                lines.len(),
                lines.join(", ")
            ));
        }
        msg
    }
}

/// Run the pipeline described by `config`.
///
/// Stages run strictly in order. If reading fails, nothing is transformed
/// and the output path is never opened.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let outcome = read_records(config.input(), config.on_parse_error)?;
    let records_read = outcome.records.len();
    info!(
        input = %config.input().display(),
        records = records_read,
        skipped = outcome.skipped.len(),
        "read stage complete"
    );

    let results = transform_all(&outcome.records);

    let records_written = write_records(config.output(), &results)?;
    info!(
        output = %config.output().display(),
        records = records_written,
        "write stage complete"
    );

    Ok(RunSummary {
        input_path: config.input.clone(),
        output_path: config.output.clone(),
        records_read,
        records_written,
        skipped: outcome.skipped,
    })
}
