//! Pipeline configuration.

use std::path::PathBuf;

use crate::record::RowShape;

pub const DEFAULT_INPUT: &str = "techcrunch.csv";
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_FILTER_COLUMN: &str = "round";
pub const DEFAULT_FILTER_VALUE: &str = "a";
pub const DEFAULT_SUM_COLUMN: &str = "raisedAmt";
pub const DEFAULT_LABEL: &str = "series A fundraising";

/// Everything a filter-sum run needs to know.
///
/// `Default` sums `raisedAmt` over the series A rounds in `techcrunch.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub delimiter: char,
    /// Categorical column compared against `filter_value`.
    pub filter_column: String,
    pub filter_value: String,
    /// Integer column summed over matching records.
    pub sum_column: String,
    pub shape: RowShape,
    /// Text between `Total` and the amount in the report line. When unset,
    /// it is derived from the columns and filter value.
    pub label: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            delimiter: DEFAULT_DELIMITER,
            filter_column: DEFAULT_FILTER_COLUMN.to_string(),
            filter_value: DEFAULT_FILTER_VALUE.to_string(),
            sum_column: DEFAULT_SUM_COLUMN.to_string(),
            shape: RowShape::default(),
            label: None,
        }
    }
}

impl PipelineConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Keep only records where `column` equals `value`.
    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter_column = column.into();
        self.filter_value = value.into();
        self
    }

    pub fn with_sum_column(mut self, column: impl Into<String>) -> Self {
        self.sum_column = column.into();
        self
    }

    pub fn with_shape(mut self, shape: RowShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label for the report line.
    ///
    /// The default columns and filter read `series A fundraising`; any other
    /// combination names the columns and value it was run with.
    pub fn label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        if self.filter_column == DEFAULT_FILTER_COLUMN
            && self.filter_value == DEFAULT_FILTER_VALUE
            && self.sum_column == DEFAULT_SUM_COLUMN
        {
            DEFAULT_LABEL.to_string()
        } else {
            format!(
                "{} where {} = {}",
                self.sum_column, self.filter_column, self.filter_value
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_series_a_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.input, PathBuf::from("techcrunch.csv"));
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.filter_column, "round");
        assert_eq!(config.filter_value, "a");
        assert_eq!(config.sum_column, "raisedAmt");
        assert_eq!(config.shape, RowShape::Truncate);
        assert_eq!(config.label, None);
        assert_eq!(config.label(), "series A fundraising");
    }

    #[test]
    fn test_builders_override_fields() {
        let config = PipelineConfig::new("data.tsv")
            .with_delimiter('\t')
            .with_filter("stage", "seed")
            .with_sum_column("amount")
            .with_shape(RowShape::Strict);
        assert_eq!(config.input, PathBuf::from("data.tsv"));
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.filter_column, "stage");
        assert_eq!(config.filter_value, "seed");
        assert_eq!(config.sum_column, "amount");
        assert_eq!(config.shape, RowShape::Strict);
        assert_eq!(config.label(), "amount where stage = seed");
    }

    #[test]
    fn test_label_follows_filter_value() {
        let config = PipelineConfig::default().with_filter("round", "b");
        assert_eq!(config.label(), "raisedAmt where round = b");
    }

    #[test]
    fn test_explicit_label_wins() {
        let config = PipelineConfig::default()
            .with_filter("round", "seed")
            .with_label("seed money");
        assert_eq!(config.label(), "seed money");
    }
}
