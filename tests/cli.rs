use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use calamine::{open_workbook, Data, Reader, Xlsx};
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;

enum Amount {
    Number(f64),
    Text(&'static str),
}

/// A statement shaped like the default layout: 16 banner/header rows, then
/// date, narration, reference and amount columns.
fn write_statement(path: &Path, rows: &[(&str, Amount)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Statement of account").unwrap();
    sheet.write_string(15, 0, "Date").unwrap();
    sheet.write_string(15, 1, "Narration").unwrap();
    sheet.write_string(15, 3, "Amount").unwrap();
    for (i, (narration, amount)) in rows.iter().enumerate() {
        let r = 16 + i as u32;
        sheet.write_string(r, 0, "01/04/2025").unwrap();
        sheet.write_string(r, 1, *narration).unwrap();
        match amount {
            Amount::Number(v) => sheet.write_number(r, 3, *v).unwrap(),
            Amount::Text(t) => sheet.write_string(r, 3, *t).unwrap(),
        };
    }
    workbook.save(path).unwrap();
}

fn sample_statement(dir: &Path) -> PathBuf {
    let path = dir.join("april.xlsx");
    write_statement(
        &path,
        &[
            ("UPI/5001/Landlord/HDFC/Rent/r1", Amount::Number(15000.0)),
            ("UPI/5002/Chaiwala/SBIN/Tea/r2", Amount::Text("1,200.50")),
            ("NEFT/SALARY/APRIL", Amount::Text("abc")),
        ],
    );
    path
}

fn spendsheet(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spendsheet").unwrap();
    cmd.arg("--config").arg(dir.join("settings.json"));
    cmd
}

#[test]
fn test_convert_writes_three_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_statement(dir.path());
    let output = dir.path().join("out").join("report.xlsx");

    spendsheet(dir.path())
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 3 transactions"));

    let mut wb: Xlsx<_> = open_workbook(&output).unwrap();
    assert_eq!(wb.sheet_names(), vec!["Output", "Consolidated", "Chart"]);

    let detail = wb.worksheet_range("Output").unwrap();
    assert_eq!(detail.get_value((1, 0)), Some(&Data::String("Rent".into())));
    assert_eq!(detail.get_value((1, 1)), Some(&Data::Float(15000.0)));
    assert_eq!(detail.get_value((2, 1)), Some(&Data::Float(1200.5)));
    assert_eq!(detail.get_value((3, 0)), Some(&Data::String("Unknown".into())));
    assert_eq!(detail.get_value((3, 1)), Some(&Data::String("abc".into())));

    let consolidated = wb.worksheet_range("Consolidated").unwrap();
    assert_eq!(consolidated.get_value((1, 0)), Some(&Data::String("Rent".into())));
    assert_eq!(consolidated.get_value((2, 0)), Some(&Data::String("Tea".into())));
    assert_eq!(consolidated.get_value((3, 0)), None);

    let chart = wb.worksheet_range("Chart").unwrap();
    assert_eq!(chart.get_value((0, 2)), Some(&Data::String("Percentage".into())));
    assert_eq!(chart.get_value((2, 0)), Some(&Data::String("Tea".into())));
}

#[test]
fn test_convert_default_output_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_statement(dir.path());

    spendsheet(dir.path())
        .arg("convert")
        .arg(&input)
        .assert()
        .success();

    assert!(dir.path().join("april-budget.xlsx").exists());
}

#[test]
fn test_convert_with_csv_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_statement(dir.path());
    let csv_dir = dir.path().join("csv");

    spendsheet(dir.path())
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("report.xlsx"))
        .arg("--csv-dir")
        .arg(&csv_dir)
        .assert()
        .success();

    let consolidated = std::fs::read_to_string(csv_dir.join("consolidated.csv")).unwrap();
    assert!(consolidated.starts_with("Category,Amount,Percentage\nRent,15000,"));
}

#[test]
fn test_unsupported_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.csv");
    std::fs::write(&input, "a,b,c\n").unwrap();

    spendsheet(dir.path())
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn test_row_limit_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_statement(dir.path());
    std::fs::write(dir.path().join("settings.json"), r#"{"max_rows": 5}"#).unwrap();

    spendsheet(dir.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 5"));
}

#[test]
fn test_summary_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_statement(dir.path());

    let assert = spendsheet(dir.path())
        .arg("summary")
        .arg(&input)
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["grand_total"], serde_json::json!(16200.5));
    assert_eq!(value["consolidated"][0]["category"], "Rent");
    assert_eq!(value["detail"].as_array().unwrap().len(), 3);
}

#[test]
fn test_summary_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_statement(dir.path());

    spendsheet(dir.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("₹15,000.00"))
        .stdout(predicate::str::contains("Tea"));
}

#[test]
fn test_layouts_lists_default() {
    let dir = tempfile::tempdir().unwrap();
    spendsheet(dir.path())
        .arg("layouts")
        .assert()
        .success()
        .stdout(predicate::str::contains("tmb (default)"));
}

#[test]
fn test_config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    spendsheet(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("upi_note"));
}

#[test]
fn test_malformed_settings_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ nope").unwrap();
    spendsheet(dir.path())
        .arg("layouts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
