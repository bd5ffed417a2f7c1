//! Header extraction and record mapping.
//!
//! The first field row becomes the [`Header`]; every later row is paired
//! with it positionally to form a [`Record`]. How rows whose length differs
//! from the header are treated is decided by [`RowShape`].

use std::rc::Rc;

use crate::error::{PipelineError, Result};
use crate::split::FieldRow;

/// Column names taken from the first line of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Rc<[String]>,
}

impl Header {
    pub fn from_row(row: FieldRow) -> Self {
        Self {
            columns: row.fields.into(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Treatment of rows whose field count differs from the header's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowShape {
    /// Pair up to the shorter of the two; extra values are dropped and
    /// missing ones leave the record without those keys.
    #[default]
    Truncate,
    /// Reject any row whose length differs from the header.
    Strict,
}

/// One data row as a column-name to value mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    line: usize,
    columns: Rc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Pair `row` with `header` under the given shape policy.
    pub fn zip(header: &Header, row: FieldRow, shape: RowShape) -> Result<Self> {
        let FieldRow { line, mut fields } = row;
        if shape == RowShape::Strict && fields.len() != header.len() {
            return Err(PipelineError::RaggedRow {
                line,
                expected: header.len(),
                found: fields.len(),
            });
        }
        fields.truncate(header.len());
        Ok(Self {
            line,
            columns: Rc::clone(&header.columns),
            values: fields,
        })
    }

    /// Line number this record was read from.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Value for `name`, if the record has that key.
    ///
    /// A repeated column name resolves to its last position, as a later
    /// insert would overwrite an earlier one in a map.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns[..self.values.len()]
            .iter()
            .rposition(|c| c == name)
            .map(|i| self.values[i].as_str())
    }

    /// Like [`get`](Self::get) but a missing key is an error.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| PipelineError::MissingField {
            line: self.line,
            field: name.to_string(),
        })
    }

    /// Number of keys in this record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .zip(&self.values)
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

/// Turns a field-row iterator into a record iterator.
///
/// Construction consumes the first row as the header.
pub struct Records<I> {
    rows: I,
    header: Header,
    shape: RowShape,
}

impl<I> Records<I>
where
    I: Iterator<Item = Result<FieldRow>>,
{
    pub fn new(mut rows: I, shape: RowShape) -> Result<Self> {
        let first = rows.next().ok_or(PipelineError::MissingHeader)??;
        Ok(Self {
            rows,
            header: Header::from_row(first),
            shape,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = Result<FieldRow>>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.and_then(|r| Record::zip(&self.header, r, self.shape)))
    }
}
