//! Run configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;

/// What the reader does with a line that is not a valid integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ParseErrorMode {
    /// Stop at the first malformed line and fail the run.
    #[default]
    Abort,
    /// Drop the line, remember it, and keep reading.
    Skip,
}

impl fmt::Display for ParseErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorMode::Abort => write!(f, "abort"),
            ParseErrorMode::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for ParseErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ParseErrorMode::Abort),
            "skip" => Ok(ParseErrorMode::Skip),
            other => Err(format!(
                "unknown on_parse_error mode '{other}' (expected 'abort' or 'skip')"
            )),
        }
    }
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub on_parse_error: ParseErrorMode,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            on_parse_error: ParseErrorMode::default(),
        }
    }

    pub fn with_on_parse_error(mut self, mode: ParseErrorMode) -> Self {
        self.on_parse_error = mode;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}
