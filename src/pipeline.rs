//! Chainable lazy pipeline and the filter-sum run built on it.
//!
//! Every stage is an iterator wrapping the one before it, so a downstream
//! `next()` pulls exactly one element through the whole chain. Nothing is
//! buffered beyond the record currently in flight.

use std::borrow::Cow;
use std::io::Read;

use tracing::{debug, trace};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::record::{Record, Records, RowShape};
use crate::report::{Report, RunStats};
use crate::source::Rows;
use crate::split::Split;

/// A lazily evaluated sequence of items with pipeline-style combinators.
///
/// ```
/// use funding_pipe::Pipeline;
///
/// let evens: Vec<u32> = Pipeline::new(1..=6u32).filter(|n| n % 2 == 0).collect();
/// assert_eq!(evens, vec![2, 4, 6]);
/// ```
pub struct Pipeline<I> {
    inner: I,
}

impl<I: Iterator> Pipeline<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Keep items for which `predicate` returns true.
    pub fn filter<P>(self, predicate: P) -> Pipeline<std::iter::Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Pipeline::new(self.inner.filter(predicate))
    }

    /// Transform each item.
    pub fn map<B, F>(self, f: F) -> Pipeline<std::iter::Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Pipeline::new(self.inner.map(f))
    }

    /// Look at each item as it passes, without changing it.
    pub fn inspect<F>(self, f: F) -> Pipeline<std::iter::Inspect<I, F>>
    where
        F: FnMut(&I::Item),
    {
        Pipeline::new(self.inner.inspect(f))
    }
}

impl<T, I> Pipeline<I>
where
    I: Iterator<Item = Result<T>>,
{
    /// Keep `Ok` items for which `predicate` returns `Ok(true)`.
    ///
    /// Upstream errors and predicate errors are passed downstream.
    pub fn try_filter<P>(self, predicate: P) -> Pipeline<TryFilter<I, P>>
    where
        P: FnMut(&T) -> Result<bool>,
    {
        Pipeline::new(TryFilter {
            inner: self.inner,
            predicate,
        })
    }

    /// Transform each `Ok` item with a fallible function.
    pub fn try_map<U, F>(self, f: F) -> Pipeline<TryMap<I, F>>
    where
        F: FnMut(T) -> Result<U>,
    {
        Pipeline::new(TryMap { inner: self.inner, f })
    }
}

impl<I> Pipeline<I>
where
    I: Iterator<Item = Result<Amount>>,
{
    /// Fold amounts into a total, stopping at the first error.
    ///
    /// An empty sequence totals `0`.
    pub fn try_sum(self) -> Result<i64> {
        let mut total: i64 = 0;
        for amount in self.inner {
            let amount = amount?;
            total = total
                .checked_add(amount.value)
                .ok_or(PipelineError::Overflow { line: amount.line })?;
        }
        Ok(total)
    }
}

impl<I: Iterator> Iterator for Pipeline<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Adaptor returned by [`Pipeline::try_filter`].
pub struct TryFilter<I, P> {
    inner: I,
    predicate: P,
}

impl<T, I, P> Iterator for TryFilter<I, P>
where
    I: Iterator<Item = Result<T>>,
    P: FnMut(&T) -> Result<bool>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(item) => match (self.predicate)(&item) {
                    Ok(true) => return Some(Ok(item)),
                    Ok(false) => continue,
                    Err(e) => return Some(Err(e)),
                },
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Adaptor returned by [`Pipeline::try_map`].
pub struct TryMap<I, F> {
    inner: I,
    f: F,
}

impl<T, U, I, F> Iterator for TryMap<I, F>
where
    I: Iterator<Item = Result<T>>,
    F: FnMut(T) -> Result<U>,
{
    type Item = Result<U>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.and_then(&mut self.f))
    }
}

/// An integer taken from a record that passed the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    pub line: usize,
    pub value: i64,
}

impl Amount {
    /// Parse `field` of `record`.
    ///
    /// Surrounding whitespace is ignored and single underscores between
    /// digits are accepted as separators (`1_000`).
    pub fn parse(record: &Record, field: &str) -> Result<Self> {
        let raw = record.require(field)?;
        let value = strip_digit_separators(raw.trim())
            .parse::<i64>()
            .map_err(|source| PipelineError::Parse {
                line: record.line(),
                field: field.to_string(),
                value: raw.to_string(),
                source,
            })?;
        Ok(Self {
            line: record.line(),
            value,
        })
    }
}

/// Drop `_` separators if every one of them sits between two digits;
/// otherwise leave the text alone so parsing rejects it.
fn strip_digit_separators(text: &str) -> Cow<'_, str> {
    if !text.contains('_') {
        return Cow::Borrowed(text);
    }
    let bytes = text.as_bytes();
    let separated = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if separated {
        Cow::Owned(text.replace('_', ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Sums one integer column over the records whose category column equals a
/// fixed value.
pub struct FilterSum {
    config: PipelineConfig,
}

impl FilterSum {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run against the configured input file.
    pub fn run(&self) -> Result<Report> {
        let config = &self.config;
        debug!(input = %config.input.display(), "opening input");
        self.run_rows(Rows::open(&config.input, config.delimiter)?)
    }

    /// Run against an already-open reader.
    pub fn run_reader<R: Read>(&self, reader: R) -> Result<Report> {
        self.run_rows(Rows::new(reader, self.config.delimiter)?)
    }

    fn run_rows<R: Read>(&self, rows: Rows<R>) -> Result<Report> {
        let config = &self.config;
        let records = Records::new(Split::new(rows, config.delimiter), config.shape)?;

        let header = records.header();
        debug!(columns = ?header.columns(), "read header");
        // A lenient run only looks a column up once a record needs it.
        if config.shape == RowShape::Strict {
            for column in [&config.filter_column, &config.sum_column] {
                if !header.contains(column) {
                    return Err(PipelineError::MissingColumn {
                        column: column.clone(),
                    });
                }
            }
        }

        let mut stats = RunStats::default();
        let total = Pipeline::new(records)
            .inspect(|r| {
                if r.is_ok() {
                    stats.records += 1;
                }
            })
            .try_filter(|record| {
                Ok(record.require(&config.filter_column)? == config.filter_value)
            })
            .inspect(|r| {
                if r.is_ok() {
                    stats.matched += 1;
                }
            })
            .try_map(|record| Amount::parse(&record, &config.sum_column))
            .inspect(|a| {
                if let Ok(amount) = a {
                    trace!(line = amount.line, value = amount.value, "matched record");
                }
            })
            .try_sum()?;

        debug!(
            records = stats.records,
            matched = stats.matched,
            total,
            "pipeline finished"
        );
        Ok(Report {
            label: config.label(),
            total,
            stats,
        })
    }
}
