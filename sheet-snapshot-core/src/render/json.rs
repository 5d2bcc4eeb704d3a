use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SnapshotError;
use crate::model::{Document, Row, Sheet};

/// Structured form of a document. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub title: String,
    pub sheets: Vec<SheetRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRecord {
    pub title: String,
    pub header_values: Option<Vec<String>>,
    pub sheet_id: i64,
    /// Display value of every cell: the hyperlink when there is one, else the text.
    pub rows: Vec<Vec<String>>,
    /// One header-keyed map per row.
    pub data: Vec<Map<String, Value>>,
}

fn row_data(row: &Row, sheet: &Sheet) -> Map<String, Value> {
    let headers = row
        .header_values
        .as_deref()
        .or(sheet.header_values.as_deref())
        .unwrap_or_default();
    let mut data = Map::new();
    for header in headers.iter().filter(|h| !h.is_empty()) {
        if let Some(value) = row.values.get(header) {
            data.insert(header.clone(), Value::String(value.clone()));
        }
    }
    data
}

/// Builds the structured record. Sheets without rows are left out.
pub fn render_record(document: &Document) -> DocumentRecord {
    let sheets = document
        .sheets
        .iter()
        .filter(|sheet| !sheet.rows.is_empty())
        .map(|sheet| SheetRecord {
            title: sheet.title.clone(),
            header_values: sheet.header_values.clone(),
            sheet_id: sheet.sheet_id,
            rows: sheet
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|cell| {
                            cell.link()
                                .or(cell.text())
                                .unwrap_or_default()
                                .to_string()
                        })
                        .collect()
                })
                .collect(),
            data: sheet.rows.iter().map(|row| row_data(row, sheet)).collect(),
        })
        .collect();

    DocumentRecord {
        title: document.title.clone(),
        sheets,
    }
}

/// The structured record as JSON text, indented by one space.
pub fn render_json(document: &Document) -> Result<String, SnapshotError> {
    let record = render_record(document);
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    record.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
