//! Source stage: lazily reads delimited rows from a file or any reader.
//!
//! The `csv` reader is configured to split only: no header handling, no
//! quoting, and rows of any length. Blank lines are skipped by the reader.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use crate::error::{PipelineError, Result};

/// One input row as split by the reader, before any trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line the row starts on.
    pub line: usize,
    pub record: StringRecord,
}

/// Iterator over the rows of an input, read one at a time.
///
/// After the first read error the iterator yields that error once and then
/// ends.
pub struct Rows<R> {
    inner: StringRecordsIntoIter<R>,
    path: PathBuf,
    read: usize,
    done: bool,
}

fn reader_builder(delimiter: char) -> Result<ReaderBuilder> {
    if !delimiter.is_ascii() {
        return Err(PipelineError::InvalidDelimiter { delimiter });
    }
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(delimiter as u8);
    Ok(builder)
}

impl Rows<File> {
    /// Open `path` for row-at-a-time reading.
    pub fn open(path: impl AsRef<Path>, delimiter: char) -> Result<Self> {
        let path = path.as_ref();
        let builder = reader_builder(delimiter)?;
        let file = File::open(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_path(&builder, file, path))
    }
}

impl<R: Read> Rows<R> {
    /// Wrap an already-open reader. Errors name it `<input>`.
    pub fn new(reader: R, delimiter: char) -> Result<Self> {
        let builder = reader_builder(delimiter)?;
        Ok(Self::with_path(&builder, reader, "<input>"))
    }

    fn with_path(builder: &ReaderBuilder, reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner: builder.from_reader(reader).into_records(),
            path: path.into(),
            read: 0,
            done: false,
        }
    }
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next()? {
            Ok(record) => {
                self.read += 1;
                let line = record
                    .position()
                    .map_or(self.read, |pos| pos.line() as usize);
                Some(Ok(RawRow { line, record }))
            }
            Err(source) => {
                self.done = true;
                Some(Err(PipelineError::Read {
                    path: self.path.clone(),
                    source,
                }))
            }
        }
    }
}
