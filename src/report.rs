//! Reporter: turns a finished run into output text.

use std::fmt;

/// Counts gathered while the pipeline runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Data records read, header excluded.
    pub records: usize,
    /// Records that passed the filter.
    pub matched: usize,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub label: String,
    pub total: i64,
    pub stats: RunStats,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_total(&self.label, self.total))
    }
}

/// The single line printed for a total, e.g.
/// `Total series A fundraising: $3500`.
pub fn format_total(label: &str, total: i64) -> String {
    format!("Total {label}: ${total}")
}
