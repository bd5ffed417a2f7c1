//! # funding-pipe
//!
//! A lazy, line-at-a-time CSV filter-and-sum pipeline.
//!
//! ## Overview
//!
//! A run is one linear chain of pull-based stages:
//! - **Source**: rows read one at a time by a split-only `csv` reader
//! - **Split**: each row trimmed of the line's trailing whitespace
//! - **Records**: the first row becomes the header, later rows are zipped
//!   with it into column-to-value records
//! - **Filter-sum**: records whose category column equals a value have an
//!   integer column parsed and added to a running total
//! - **Report**: the total formatted as one line of text
//!
//! No stage holds more than the record in flight, and a value is only
//! parsed once its record has passed the filter.
//!
//! ## Example
//!
//! ```
//! use funding_pipe::{FilterSum, PipelineConfig};
//! use std::io::Cursor;
//!
//! let input = "name,round,raisedAmt\nAcme,a,1000\nBeta,b,5000\nGamma,a,2500\n";
//! let report = FilterSum::new(PipelineConfig::default())
//!     .run_reader(Cursor::new(input))
//!     .unwrap();
//!
//! assert_eq!(report.total, 3500);
//! assert_eq!(report.to_string(), "Total series A fundraising: $3500");
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod source;
pub mod split;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{Amount, FilterSum, Pipeline, TryFilter, TryMap};
pub use record::{Header, Record, Records, RowShape};
pub use report::{Report, RunStats, format_total};
pub use source::{RawRow, Rows};
pub use split::{FieldRow, Split};
