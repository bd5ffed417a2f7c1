//! CLI tool to total one integer column over the rows of a CSV file that
//! match a category.
//!
//! Usage:
//!   funding-total [input.csv]
//!   funding-total data.csv --filter-column stage --filter-value seed --sum-column amount
//!
//! Prints `Total series A fundraising: $<total>` to stdout for the default
//! columns, and `Total <sum> where <column> = <value>: $<total>` otherwise.

use clap::Parser;
use funding_pipe::{
    FilterSum, PipelineConfig, RowShape,
    config::{
        DEFAULT_DELIMITER, DEFAULT_FILTER_COLUMN, DEFAULT_FILTER_VALUE, DEFAULT_INPUT,
        DEFAULT_SUM_COLUMN,
    },
};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sum an integer column over the CSV rows whose category column matches.
#[derive(Parser)]
#[command(name = "funding-total")]
struct Cli {
    /// Input CSV file with a header line
    #[arg(default_value = DEFAULT_INPUT)]
    input: String,

    /// Field delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    /// Column compared against --filter-value
    #[arg(long, default_value = DEFAULT_FILTER_COLUMN)]
    filter_column: String,

    /// Value a record's filter column must equal
    #[arg(long, default_value = DEFAULT_FILTER_VALUE)]
    filter_value: String,

    /// Integer column to sum
    #[arg(long, default_value = DEFAULT_SUM_COLUMN)]
    sum_column: String,

    /// Text printed between "Total" and the amount
    #[arg(long)]
    label: Option<String>,

    /// Reject rows whose field count differs from the header, and check
    /// the filter and sum columns against it before reading any rows
    #[arg(long)]
    strict: bool,

    /// Show input and record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> PipelineConfig {
        let shape = if self.strict {
            RowShape::Strict
        } else {
            RowShape::Truncate
        };
        let config = PipelineConfig::new(&self.input)
            .with_delimiter(self.delimiter)
            .with_filter(&self.filter_column, &self.filter_value)
            .with_sum_column(&self.sum_column)
            .with_shape(shape);
        match &self.label {
            Some(label) => config.with_label(label),
            None => config,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let filter_sum = FilterSum::new(cli.config());
    let config = filter_sum.config();
    if cli.verbose {
        eprintln!("Input:    {}", config.input.display());
        eprintln!(
            "Filter:   {} = {:?}, sum {}",
            config.filter_column, config.filter_value, config.sum_column
        );
    }
    info!(input = %config.input.display(), "funding-total starting");

    match filter_sum.run() {
        Ok(report) => {
            println!("{report}");
            if cli.verbose {
                eprintln!(
                    "Records:  {} in -> {} matched",
                    report.stats.records, report.stats.matched
                );
            }
        }
        Err(e) => {
            eprintln!("Pipeline error: {e}");
            process::exit(1);
        }
    }
}
