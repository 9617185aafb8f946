//! # recpipe-rs
//!
//! A small batch-record pipeline: read integers from a text file, square the
//! even ones and cube the odd ones, and write the results to another file.
//!
//! ## Overview
//!
//! A run is three stages executed strictly in order:
//! - **Reader**: parses one base-10 integer per non-blank line
//! - **Transformer**: maps each record to its square (even) or cube (odd)
//! - **Writer**: emits one result per line, in input order
//!
//! Every stage returns a [`Result`]; a failed stage stops the run before the
//! next one starts. Malformed lines either abort the run or are skipped and
//! reported, depending on [`ParseErrorMode`].
//!
//! The [`source`] module defines the connect/query/disconnect capability for
//! external record sources, with scoped connection release.
//!
//! ## Example
//!
//! ```
//! use recpipe_rs::{Record, RecordSequence, transform_all};
//!
//! let input: RecordSequence = [1, 2, 3, 4].into_iter().map(Record::new).collect();
//! let output: Vec<String> = transform_all(&input).iter().map(|p| p.to_string()).collect();
//!
//! assert_eq!(output, ["1", "4", "27", "16"]);
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod source;
pub mod transform;
pub mod writer;

pub use config::{ParseErrorMode, RunConfig};
pub use error::{PipelineError, Result, SourceError};
pub use pipeline::{RunSummary, run};
pub use reader::{ReadOutcome, RecordReader, SkippedLine, read_records};
pub use record::{Power, Record, RecordSequence};
pub use source::{
    Connection, DirectoryConnection, DirectorySource, RecordSource, Row, Rows, Session, fetch_all,
};
pub use transform::{transform, transform_all};
pub use writer::{RecordWriter, write_records};
