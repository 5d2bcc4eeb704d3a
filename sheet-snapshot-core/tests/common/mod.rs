#![allow(dead_code)]

use chrono::Utc;
use sheet_snapshot_core::model::{Cell, Document, Row, Sheet};

pub fn cell(text: &str) -> Cell {
    Cell {
        formatted_value: Some(text.to_string()),
        ..Default::default()
    }
}

pub fn linked(text: &str, link: &str) -> Cell {
    Cell {
        formatted_value: Some(text.to_string()),
        hyperlink: Some(link.to_string()),
        ..Default::default()
    }
}

/// A row whose logical values mirror its cells' text.
pub fn row(row_number: usize, headers: &[&str], cells: Vec<Cell>) -> Row {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let raw: Vec<String> = cells
        .iter()
        .map(|c| c.formatted_value.clone().unwrap_or_default())
        .collect();
    Row {
        row_number,
        values: Row::values_from(&headers, &raw),
        cells,
        header_values: None,
    }
}

pub fn sheet(title: &str, sheet_id: i64, headers: Option<&[&str]>, rows: Vec<Row>) -> Sheet {
    Sheet {
        title: title.to_string(),
        sheet_id,
        header_values: headers.map(|h| h.iter().map(|s| s.to_string()).collect()),
        rows,
    }
}

pub fn document(sheets: Vec<Sheet>) -> Document {
    Document {
        title: "Roster".to_string(),
        spreadsheet_id: "X".to_string(),
        loaded_at: Utc::now(),
        sheets,
    }
}

/// One sheet `People` with headers `Name`, `URL` and a single row.
pub fn roster() -> Document {
    let headers = ["Name", "URL"];
    document(vec![sheet(
        "People",
        0,
        Some(&headers[..]),
        vec![row(2, &headers, vec![cell("Alice"), linked("site", "https://x")])],
    )])
}
