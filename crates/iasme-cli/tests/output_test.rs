use chrono::NaiveDate;
use iasme_cli::{apply_rename_map, render_records, write_output};
use iasme_core::{CompanyRecord, OutputFormat, RenameMap};
use serde_json::Value;
use tempfile::TempDir;

fn record(company: &str) -> CompanyRecord {
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid test date");
    let mut record = CompanyRecord::new(company, date);
    record.website = Some("https://acme.test".to_string());
    record.domain = Some("acme.test".to_string());
    record.emails = vec!["info@acme.test".to_string()];
    record.sources = vec!["https://iasme.co.uk/network-directory/".to_string()];
    record
}

#[test]
fn test_rename_map_applies_to_top_level_keys() {
    let map = RenameMap::from([
        ("company".to_string(), "organisation".to_string()),
        ("last_seen".to_string(), "seen_on".to_string()),
    ]);

    let value = apply_rename_map(&record("Acme Ltd"), Some(&map)).expect("rename");

    assert_eq!(value["organisation"], "Acme Ltd");
    assert_eq!(value["seen_on"], "2025-06-01");
    assert!(value.get("company").is_none());
    // Unmapped keys are untouched
    assert_eq!(value["domain"], "acme.test");
    assert_eq!(value.as_object().map(|o| o.len()), Some(13));
}

#[test]
fn test_without_map_keeps_field_order() {
    let value = apply_rename_map(&record("Acme Ltd"), None).expect("serialize");
    let keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.first(), Some(&"company"));
    assert_eq!(keys.last(), Some(&"last_seen"));
}

#[test]
fn test_jsonl_one_object_per_line() {
    let rendered = render_records(
        &[record("Acme Ltd"), record("Globex")],
        OutputFormat::Jsonl,
        None,
    )
    .expect("render");

    assert!(rendered.ends_with('\n'));
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    let second: Value = serde_json::from_str(lines[1]).expect("valid JSON line");
    assert_eq!(second["company"], "Globex");
}

#[test]
fn test_json_is_pretty_array() {
    let rendered = render_records(&[record("Acme Ltd")], OutputFormat::Json, None).expect("render");

    assert!(rendered.starts_with("[\n  {"));
    let parsed: Value = serde_json::from_str(&rendered).expect("valid JSON");
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_write_output_creates_parent_directory() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("nested").join("out").join("companies.jsonl");

    write_output(&path, &[record("Acme Ltd")], OutputFormat::Jsonl, None).expect("write");

    let contents = std::fs::read_to_string(&path).expect("read output");
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("\"company\":\"Acme Ltd\""));
}

#[test]
fn test_write_empty_jsonl() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("empty.jsonl");

    write_output(&path, &[], OutputFormat::Jsonl, None).expect("write");

    assert_eq!(std::fs::read_to_string(&path).expect("read output"), "");
}
