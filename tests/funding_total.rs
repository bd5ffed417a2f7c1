use funding_pipe::{FilterSum, PipelineConfig, PipelineError, RowShape};
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const HEADER: &str = "name,round,raisedAmt";

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn total_of(lines: &[&str]) -> i64 {
    let file = csv_file(lines);
    FilterSum::new(PipelineConfig::new(file.path()))
        .run()
        .unwrap()
        .total
}

fn funding_total() -> Command {
    Command::new(env!("CARGO_BIN_EXE_funding-total"))
}

#[test]
fn test_series_a_total_from_file() {
    let total = total_of(&[HEADER, "Acme,a,1000", "Beta,b,5000", "Gamma,a,2500"]);
    assert_eq!(total, 3500);
}

#[test]
fn test_order_of_other_rows_does_not_matter() {
    let a = total_of(&[
        HEADER,
        "Beta,b,5000",
        "Acme,a,1000",
        "Delta,c,7",
        "Gamma,a,2500",
    ]);
    let b = total_of(&[
        HEADER,
        "Acme,a,1000",
        "Delta,c,7",
        "Gamma,a,2500",
        "Beta,b,5000",
    ]);
    assert_eq!(a, 3500);
    assert_eq!(a, b);
}

#[test]
fn test_crlf_input() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"name,round,raisedAmt\r\nAcme,a,10\r\nBeta,a,5\r\n")
        .unwrap();
    file.flush().unwrap();
    let report = FilterSum::new(PipelineConfig::new(file.path()))
        .run()
        .unwrap();
    assert_eq!(report.total, 15);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = FilterSum::new(PipelineConfig::new(&path)).run().unwrap_err();
    match err {
        PipelineError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("Expected Io, got {other:?}"),
    }
}

#[test]
fn test_strict_file_run() {
    let file = csv_file(&[HEADER, "Acme,a,1000", "Beta,a"]);
    let config = PipelineConfig::new(file.path()).with_shape(RowShape::Strict);
    let err = FilterSum::new(config).run().unwrap_err();
    assert!(matches!(
        err,
        PipelineError::RaggedRow {
            line: 3,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn test_cli_prints_total() {
    let file = csv_file(&[HEADER, "Acme,a,1000", "Beta,b,5000", "Gamma,a,2500"]);
    let output = funding_total().arg(file.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Total series A fundraising: $3500\n"
    );
}

#[test]
fn test_cli_header_only_prints_zero() {
    let file = csv_file(&[HEADER]);
    let output = funding_total().arg(file.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Total series A fundraising: $0\n"
    );
}

#[test]
fn test_cli_parse_error_prints_nothing_and_fails() {
    let file = csv_file(&[HEADER, "Acme,a,1000", "Bad,a,n/a"]);
    let output = funding_total().arg(file.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Pipeline error: line 3"));
}

#[test]
fn test_cli_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = funding_total()
        .arg(dir.path().join("absent.csv"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.csv"));
}

#[test]
fn test_cli_custom_columns() {
    let file = csv_file(&["company;stage;amount", "A;seed;7", "B;a;100", "C;seed;8"]);
    let output = funding_total()
        .arg(file.path())
        .args(["-d", ";", "--filter-column", "stage", "--filter-value", "seed"])
        .args(["--sum-column", "amount"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Total amount where stage = seed: $15\n"
    );
}

#[test]
fn test_cli_explicit_label() {
    let file = csv_file(&[HEADER, "Acme,seed,40", "Beta,a,5000"]);
    let output = funding_total()
        .arg(file.path())
        .args(["--filter-value", "seed", "--label", "seed funding"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Total seed funding: $40\n"
    );
}

#[test]
fn test_blank_lines_in_file_are_skipped() {
    let total = total_of(&[HEADER, "", "Acme,a,1000", "", "Gamma,a,2500", ""]);
    assert_eq!(total, 3500);
}

#[test]
fn test_header_without_amount_column_totals_zero_when_nothing_matches() {
    let total = total_of(&["name,round,amount", "Beta,b,5"]);
    assert_eq!(total, 0);
}

#[test]
fn test_cli_strict_checks_header() {
    let file = csv_file(&["name,round,amount", "Beta,b,5"]);
    let output = funding_total()
        .arg(file.path())
        .arg("--strict")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("column 'raisedAmt' not found"));
}

#[test]
fn test_cli_verbose_reports_counts_on_stderr() {
    let file = csv_file(&[HEADER, "Acme,a,1000", "Beta,b,5000"]);
    let output = funding_total()
        .arg(file.path())
        .arg("--verbose")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Total series A fundraising: $1000\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Records:  2 in -> 1 matched"));
}
