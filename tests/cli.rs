use std::fs;

use clap::Parser;
use shoutouts::cli::{Args, run_with};
use shoutouts::config::Preset;
use shoutouts::sample::{sample_rows, write_workbook};

fn args(list: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("shoutouts").chain(list.iter().copied())).unwrap()
}

#[test]
fn html_page_written_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("team.xlsx");
    let (headers, rows) = sample_rows(Preset::Reason);
    write_workbook(&book, &headers, &rows).unwrap();
    let out = dir.path().join("cards.html");

    run_with(
        args(&[
            book.to_str().unwrap(),
            "--format",
            "html",
            "--title",
            "Kudos",
            "-o",
            out.to_str().unwrap(),
        ]),
        dir.path(),
    )
    .unwrap();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<title>Kudos</title>"));
    assert_eq!(html.matches("<article class=\"card\">").count(), 3);
    assert!(html.contains("<footer>By Evelin Ortiz</footer>"));
    assert!(html.contains("Import Again"));
}

#[test]
fn config_file_drives_preset_and_photos() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("shoutouts.yaml"),
        "preset: send\nphotos:\n  Sam Lee: /sam.png\n",
    )
    .unwrap();
    let book = dir.path().join("fran.xlsx");
    let (headers, rows) = sample_rows(Preset::Send);
    write_workbook(&book, &headers, &rows).unwrap();
    let out = dir.path().join("cards.json");

    run_with(
        args(&[book.to_str().unwrap(), "--format", "json", "-o", out.to_str().unwrap()]),
        dir.path(),
    )
    .unwrap();

    let json = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let cards = value["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["quote_text"], "Thank you for every code review");
    // the config table replaces the built-in one
    assert_eq!(cards[0]["photo_key"], serde_json::Value::Null);
    assert_eq!(cards[1]["photo_key"], serde_json::Value::Null);
}

#[test]
fn quote_column_flag_overrides_preset() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("team.xlsx");
    write_workbook(&book, &["Name", "Kudos", "Reason"], &[vec!["Sam", "from kudos", "from reason"]])
        .unwrap();
    let out = dir.path().join("cards.txt");

    run_with(
        args(&[book.to_str().unwrap(), "--quote-column", "KUDOS", "-o", out.to_str().unwrap()]),
        dir.path(),
    )
    .unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"from kudos\""));
    assert!(!text.contains("from reason"));
}

#[test]
fn missing_file_argument_reports_banner() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cards.txt");

    let err = run_with(args(&["-o", out.to_str().unwrap()]), dir.path()).unwrap_err();
    assert_eq!(err.to_string(), "No file selected");

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("[Error] No file selected"));
    assert!(text.contains("Click to upload Excel file"));
}

#[test]
fn wrong_extension_reports_banner() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cards.txt");

    let err = run_with(args(&["notes.csv", "-o", out.to_str().unwrap()]), dir.path()).unwrap_err();
    assert_eq!(err.to_string(), "Please upload a valid Excel file (.xlsx or .xls)");
}
