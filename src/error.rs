//! Error types for the record pipeline and the record-source capability.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, transforming, or writing records.
///
/// Every variant names what went wrong and where, so the CLI can print a
/// single diagnostic without extra context.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file does not exist.
    #[error("NotFoundError: input file '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    /// A non-empty line did not parse as a base-10 integer.
    #[error("ParseError: line {line}: '{raw}' is not a valid integer")]
    Parse {
        /// 1-based physical line number.
        line: usize,
        /// The line as read, before trimming.
        raw: String,
    },

    /// Opening, reading, writing, or flushing a file failed.
    #[error("IOError: '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Short name of the error kind, as shown at the start of the message.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NotFound { .. } => "NotFoundError",
            PipelineError::Parse { .. } => "ParseError",
            PipelineError::Io { .. } => "IOError",
        }
    }

    /// Build an `Io` error for `path`.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to an error raised by a path-less stream.
    ///
    /// `Io` errors produced against an in-memory reader or writer carry an
    /// empty path; this fills it in once the caller knows the file.
    pub(crate) fn at_path(self, path: &std::path::Path) -> Self {
        match self {
            PipelineError::Io { path: p, source } if p.as_os_str().is_empty() => {
                PipelineError::io(path, source)
            }
            other => other,
        }
    }
}

/// Errors raised by a [`RecordSource`](crate::source::RecordSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The statement was rejected.
    #[error("query failed: {sql}: {reason}")]
    Query { sql: String, reason: String },

    /// The statement named a table the source does not have.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// A query was issued on a connection that was already closed.
    #[error("connection is closed")]
    NotConnected,

    /// Underlying I/O failure while reading table data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
