//! Writer stage: emits one value per line.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::record::RecordSequence;

/// Buffered line writer.
///
/// Errors are reported with an empty path; [`write_records`] fills in the
/// file name.
pub struct RecordWriter<W: Write> {
    inner: BufWriter<W>,
    records_written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
            records_written: 0,
        }
    }

    /// Write one value followed by a newline.
    pub fn write<T: Display>(&mut self, value: &T) -> Result<()> {
        writeln!(self.inner, "{value}").map_err(|e| PipelineError::io("", e))?;
        self.records_written += 1;
        Ok(())
    }

    /// Write every value in order, then flush.
    ///
    /// If a write fails partway, the lines already buffered are still
    /// flushed before the write error is returned.
    pub fn write_all<T: Display>(&mut self, values: &RecordSequence<T>) -> Result<()> {
        for value in values {
            if let Err(e) = self.write(value) {
                let _ = self.inner.flush();
                return Err(e);
            }
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| PipelineError::io("", e))
    }

    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| PipelineError::io("", e.into_error()))
    }
}

/// Create (or truncate) `path` and write `values` to it, one per line.
///
/// Missing parent directories are created. Returns the number of lines
/// written. The file is flushed and closed before this returns.
pub fn write_records<T: Display>(path: &Path, values: &RecordSequence<T>) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    debug!(path = %path.display(), count = values.len(), "writing records");

    let mut writer = RecordWriter::new(file);
    writer.write_all(values).map_err(|e| e.at_path(path))?;
    Ok(writer.records_written())
}
