mod common;

use common::{cell, document, roster, row, sheet};
use serde_json::{json, Value};
use sheet_snapshot_core::model::{RenderOptions, Row};
use sheet_snapshot_core::render::{render_html, render_json, render_markdown, render_record};

#[test]
fn data_reads_back_display_values_by_header() {
    let record = render_record(&roster());
    let people = &record.sheets[0];

    assert_eq!(people.rows[0], vec!["Alice", "https://x"]);
    assert_eq!(Value::Object(people.data[0].clone()), json!({"Name": "Alice", "URL": "site"}));
    assert_eq!(people.data[0]["Name"], Value::String("Alice".into()));
}

#[test]
fn sheets_without_rows_are_left_out_of_the_record_only() {
    let headers = ["A"];
    let mut doc = roster();
    doc.sheets.push(sheet("Empty", 5, Some(&headers[..]), vec![]));

    let record = render_record(&doc);
    assert_eq!(record.sheets.len(), 1);
    assert_eq!(record.sheets[0].title, "People");

    let markdown = render_markdown(&doc, &RenderOptions::default());
    assert!(markdown.contains("## Empty\n\n| A |\n| -- |\n"));
    let html = render_html(&doc, &RenderOptions::default());
    assert!(html.contains("<h2 id='sheet5'>"));
    assert!(html.contains("<th>A</th>"));
}

#[test]
fn json_keys_keep_their_order_and_one_space_indent() {
    let text = render_json(&roster()).expect("render");
    assert!(text.starts_with("{\n \"title\": \"Roster\",\n \"sheets\": [\n  {\n   \"title\": \"People\","), "got: {text}");

    let value: Value = serde_json::from_str(&text).expect("valid json");
    let top: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(top, ["title", "sheets"]);
    let sheet_keys: Vec<&String> = value["sheets"][0].as_object().unwrap().keys().collect();
    assert_eq!(sheet_keys, ["title", "headerValues", "sheetId", "rows", "data"]);
    assert_eq!(value["sheets"][0]["sheetId"], json!(0));
    assert_eq!(value["sheets"][0]["headerValues"], json!(["Name", "URL"]));
}

#[test]
fn row_header_override_wins_and_empty_headers_are_skipped() {
    let headers = ["Name", "", "Age"];
    // built against the sheet's headers, then given its own
    let mut overridden = row(3, &headers, vec![cell("Al")]);
    overridden.override_headers(vec!["Alias".to_string()], &["Al".to_string()]);
    assert_eq!(overridden.values.get("Name"), None);

    let doc = document(vec![sheet(
        "S",
        0,
        Some(&headers[..]),
        vec![
            row(2, &headers, vec![cell("Bob"), cell("skip"), cell("42")]),
            overridden,
        ],
    )]);
    let record = render_record(&doc);
    let data = &record.sheets[0].data;

    assert_eq!(Value::Object(data[0].clone()), json!({"Name": "Bob", "Age": "42"}));
    let keys: Vec<&String> = data[0].keys().collect();
    assert_eq!(keys, ["Name", "Age"]);
    assert_eq!(Value::Object(data[1].clone()), json!({"Alias": "Al"}));
}

#[test]
fn headers_without_values_are_omitted_from_data() {
    let headers = ["A", "B"];
    let short = Row {
        row_number: 2,
        cells: vec![cell("only")],
        header_values: None,
        values: Row::values_from(&["A".to_string(), "B".to_string()], &["only".to_string()]),
    };
    let doc = document(vec![sheet("S", 0, Some(&headers[..]), vec![short])]);
    let record = render_record(&doc);
    assert_eq!(Value::Object(record.sheets[0].data[0].clone()), json!({"A": "only"}));
    assert_eq!(record.sheets[0].rows[0], vec!["only"]);
}
