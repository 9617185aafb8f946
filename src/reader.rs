//! Reader stage: parses line-oriented text into [`Record`]s.
//!
//! [`RecordReader`] is a lazy iterator over any [`BufRead`]. Each
//! non-blank line must hold one base-10 integer; surrounding whitespace
//! is ignored. What happens on a malformed line is decided by
//! [`ParseErrorMode`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ParseErrorMode;
use crate::error::{PipelineError, Result};
use crate::record::{Record, RecordSequence};

/// A line dropped under [`ParseErrorMode::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based physical line number.
    pub line: usize,
    /// The line as read, without its terminator.
    pub raw: String,
}

/// Lazy record reader.
///
/// Yields `Ok(record)` per valid line. Stops after the first `Err`; in
/// skip mode malformed lines never surface as errors and are collected in
/// [`skipped`](Self::skipped) instead.
pub struct RecordReader<R> {
    inner: R,
    mode: ParseErrorMode,
    buf: String,
    line_no: usize,
    records_read: usize,
    skipped: Vec<SkippedLine>,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R, mode: ParseErrorMode) -> Self {
        Self {
            inner,
            mode,
            buf: String::new(),
            line_no: 0,
            records_read: 0,
            skipped: Vec::new(),
            finished: false,
        }
    }

    /// Number of records yielded so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Lines dropped so far in skip mode.
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<SkippedLine> {
        self.skipped
    }

    /// Read the next physical line into `buf`, stripping the terminator
    /// and a UTF-8 byte order mark on the first line.
    fn next_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        if self.line_no == 1 && self.buf.starts_with('\u{feff}') {
            self.buf.replace_range(..'\u{feff}'.len_utf8(), "");
        }
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(true)
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.next_line() {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(PipelineError::io("", e)));
                }
            }

            let token = self.buf.trim();
            if token.is_empty() {
                continue;
            }

            match parse_record(token) {
                Some(record) => {
                    self.records_read += 1;
                    return Some(Ok(record));
                }
                None => match self.mode {
                    ParseErrorMode::Abort => {
                        self.finished = true;
                        return Some(Err(PipelineError::Parse {
                            line: self.line_no,
                            raw: self.buf.clone(),
                        }));
                    }
                    ParseErrorMode::Skip => {
                        warn!(line = self.line_no, raw = %self.buf, "skipping malformed line");
                        self.skipped.push(SkippedLine {
                            line: self.line_no,
                            raw: self.buf.clone(),
                        });
                    }
                },
            }
        }
    }
}

/// Parse one trimmed, non-empty token as a base-10 `i64`.
///
/// Accepts an optional leading sign. Anything else (decimals, exponents,
/// hex, embedded spaces, out-of-range values) is rejected.
fn parse_record(token: &str) -> Option<Record> {
    token.parse::<i64>().ok().map(Record::new)
}

/// Everything the reader produced for one file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOutcome {
    pub records: RecordSequence<Record>,
    pub skipped: Vec<SkippedLine>,
}

/// Open `path` and read every record from it.
///
/// A missing file is [`PipelineError::NotFound`]; other open and read
/// failures are [`PipelineError::Io`] naming the path. The handle is closed
/// when this returns, whatever the outcome.
pub fn read_records(path: &Path, mode: ParseErrorMode) -> Result<ReadOutcome> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PipelineError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PipelineError::io(path, e),
    })?;
    debug!(path = %path.display(), %mode, "reading records");

    let mut reader = RecordReader::new(BufReader::new(file), mode);
    let records = reader
        .by_ref()
        .collect::<Result<RecordSequence<Record>>>()
        .map_err(|e| e.at_path(path))?;

    Ok(ReadOutcome {
        records,
        skipped: reader.into_skipped(),
    })
}
