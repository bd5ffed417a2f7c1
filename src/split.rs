//! Splitter stage: turns reader rows into ordered field rows.

use crate::error::Result;
use crate::source::RawRow;

/// A line broken into its delimited fields, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl FieldRow {
    /// Take the fields of `row` with the line's trailing whitespace removed.
    ///
    /// Trailing whitespace belongs to the last field, unless the delimiter
    /// is itself whitespace, in which case trailing empty fields go too.
    pub fn from_raw(row: &RawRow, delimiter: char) -> Self {
        let mut fields: Vec<String> = row.record.iter().map(str::to_string).collect();
        while let Some(last) = fields.last_mut() {
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
            if trimmed > 0 || fields.len() == 1 || !delimiter.is_whitespace() {
                break;
            }
            fields.pop();
        }
        Self {
            line: row.line,
            fields,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Adapts a raw row iterator into a field-row iterator.
pub struct Split<I> {
    rows: I,
    delimiter: char,
}

impl<I> Split<I>
where
    I: Iterator<Item = Result<RawRow>>,
{
    pub fn new(rows: I, delimiter: char) -> Self {
        Self { rows, delimiter }
    }
}

impl<I> Iterator for Split<I>
where
    I: Iterator<Item = Result<RawRow>>,
{
    type Item = Result<FieldRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.map(|r| FieldRow::from_raw(&r, self.delimiter)))
    }
}
