//! E2E tests for the capgains binary

use std::process::Command;

/// Test a mixed file splits into short and long term sections
#[test]
fn report_splits_terms() {
    let output = Command::new("cargo")
        .args(["run", "--", "tests/data/disposals.csv"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    // Verify the command succeeded
    assert!(output.status.success(), "Command failed: {:?}", output);

    // Verify both sections are present, short term first
    assert!(stdout.find("Short Term").unwrap() < stdout.find("Long Term").unwrap());

    // Short term totals: BTC 1000/600, ETH 301/120, SOL 250/300
    assert!(stdout.contains("  Proceeds: $1,551 | Cost Basis: $1,020 | Gain: $531"));

    // Long term totals: the 2021 BTC lot only
    assert!(stdout.contains("  Proceeds: $5,000 | Cost Basis: $4,800 | Gain: $200"));

    // Verify the loss renders signed and all assets appear
    assert!(stdout.contains("-$50"));
    assert!(stdout.contains("BTC"));
    assert!(stdout.contains("ETH"));
    assert!(stdout.contains("SOL"));
}

/// Test a file with no long term disposals renders the placeholder
#[test]
fn single_disposal_report() {
    let output = Command::new("cargo")
        .args(["run", "--", "tests/data/single.csv"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    // Verify the command succeeded
    assert!(output.status.success(), "Command failed: {:?}", output);

    // Verify the rounded amounts for the one BTC disposal
    assert!(stdout.contains("$1,000"));
    assert!(stdout.contains("$600"));
    assert!(stdout.contains("$400"));

    // Verify the empty long term bucket
    assert!(stdout.contains("(no disposals)"));
}

/// Test the report is byte-identical across runs
#[test]
fn same_input_same_report() {
    let first = Command::new("cargo")
        .args(["run", "--", "tests/data/disposals.csv"])
        .output()
        .expect("Failed to execute command");

    let second = Command::new("cargo")
        .args(["run", "--", "tests/data/disposals.csv"])
        .output()
        .expect("Failed to execute command");

    assert!(first.status.success(), "Command failed: {:?}", first);
    assert_eq!(first.stdout, second.stdout);
}

/// Test a missing required column fails with the column name
#[test]
fn missing_column_fails() {
    let output = Command::new("cargo")
        .args(["run", "--", "tests/data/missing_column.csv"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(stderr.contains("missing expected column 'Cost basis (USD)'"));

    // Verify no partial report was printed
    assert!(!stdout.contains("Short Term"));
}

/// Test an unparseable amount fails with row and column context
#[test]
fn invalid_amount_fails() {
    let output = Command::new("cargo")
        .args(["run", "--", "tests/data/bad_amount.csv"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("row 2: invalid amount in 'Proceeds (USD)': '12x4'"));
}

/// Test an unparseable date fails with row and column context
#[test]
fn invalid_date_fails() {
    let output = Command::new("cargo")
        .args(["run", "--", "tests/data/bad_date.csv"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("row 2: invalid date in 'Date Acquired': 'whenever'"));
}

/// Test a disposition dated before its acquisition fails
#[test]
fn inverted_dates_fail() {
    let output = Command::new("cargo")
        .args(["run", "--", "tests/data/inverted_dates.csv"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(stderr.contains("BTC: disposed 2023-01-01 before acquired 2023-06-01"));
    assert!(!stdout.contains("Short Term"));
}

/// Test a nonexistent input path fails with the path in the message
#[test]
fn missing_file_fails() {
    let output = Command::new("cargo")
        .args(["run", "--", "tests/data/nope.csv"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("failed to open tests/data/nope.csv"));
}
