use sheet_snapshot_core::assemble::{assemble, extract_spreadsheet_id};
use sheet_snapshot_core::contract::{
    CellGrid, MockSpreadsheetSource, RawRow, SheetInfo, SheetRows, SpreadsheetInfo,
};
use sheet_snapshot_core::model::{Cell, CellStyle};
use sheet_snapshot_core::SnapshotError;

fn text(value: &str) -> Cell {
    Cell {
        formatted_value: Some(value.to_string()),
        ..Default::default()
    }
}

fn info() -> SpreadsheetInfo {
    SpreadsheetInfo {
        title: "Roster".to_string(),
        sheets: vec![
            SheetInfo {
                sheet_id: 0,
                title: "People".to_string(),
            },
            SheetInfo {
                sheet_id: 42,
                title: "Empty".to_string(),
            },
        ],
    }
}

fn people_grid() -> CellGrid {
    let bold = Cell {
        formatted_value: Some("Alice".to_string()),
        style: CellStyle {
            bold: true,
            ..Default::default()
        },
        ..Default::default()
    };
    CellGrid {
        rows: vec![
            vec![text("Name"), text("URL"), text("Extra")],
            vec![
                bold,
                Cell {
                    formatted_value: Some("site".to_string()),
                    hyperlink: Some("https://x".to_string()),
                    ..Default::default()
                },
                text("ignored"),
            ],
            vec![],
            vec![text("Carol")],
        ],
    }
}

fn people_rows() -> SheetRows {
    SheetRows {
        header_values: Some(vec!["Name".to_string(), "URL".to_string()]),
        rows: vec![
            RawRow {
                row_number: 2,
                raw_data: vec!["Alice".to_string(), "site".to_string()],
            },
            RawRow {
                row_number: 3,
                raw_data: vec![],
            },
            RawRow {
                row_number: 4,
                raw_data: vec!["Carol".to_string(), String::new(), "late".to_string()],
            },
        ],
    }
}

fn mock_source() -> MockSpreadsheetSource {
    let mut source = MockSpreadsheetSource::new();
    source
        .expect_load_info()
        .withf(|id: &str| id == "abc123")
        .times(1)
        .returning(|_| Ok(info()));
    source
        .expect_load_cells()
        .returning(|_, sheet: &SheetInfo| {
            Ok(if sheet.sheet_id == 0 {
                people_grid()
            } else {
                CellGrid::default()
            })
        });
    source
        .expect_load_rows()
        .returning(|_, sheet: &SheetInfo| {
            Ok(if sheet.sheet_id == 0 {
                people_rows()
            } else {
                SheetRows::default()
            })
        });
    source
}

#[test]
fn extracts_id_from_spreadsheet_links() {
    assert_eq!(
        extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/abc123/edit#gid=0"),
        "abc123"
    );
    assert_eq!(
        extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/abc123"),
        "abc123"
    );
    assert_eq!(extract_spreadsheet_id("abc123"), "abc123");
}

#[tokio::test]
async fn assembles_rows_from_grid_cells() {
    let source = mock_source();
    let doc = assemble(&source, "https://docs.google.com/spreadsheets/d/abc123/edit")
        .await
        .expect("assembled");

    assert_eq!(doc.title, "Roster");
    assert_eq!(doc.spreadsheet_id, "abc123");
    assert_eq!(doc.sheets.len(), 2);

    let people = &doc.sheets[0];
    assert_eq!(people.title, "People");
    assert_eq!(people.header_values.as_deref().unwrap(), ["Name", "URL"]);
    assert_eq!(people.rows.len(), 3);

    // one cell per raw value, taken from grid row (row_number - 1)
    let alice = &people.rows[0];
    assert_eq!(alice.cells.len(), 2);
    assert!(alice.cells[0].style.bold);
    assert_eq!(alice.cells[1].hyperlink.as_deref(), Some("https://x"));
    assert_eq!(alice.values.get("URL").map(String::as_str), Some("site"));

    assert!(people.rows[1].cells.is_empty());

    // columns past the loaded grid come back empty
    let carol = &people.rows[2];
    assert_eq!(carol.cells.len(), 3);
    assert_eq!(carol.cells[0].formatted_value.as_deref(), Some("Carol"));
    assert_eq!(carol.cells[2], Cell::default());
    assert_eq!(carol.values.len(), 2);

    let empty = &doc.sheets[1];
    assert_eq!(empty.sheet_id, 42);
    assert!(empty.header_values.is_none());
    assert!(empty.rows.is_empty());
}

#[tokio::test]
async fn one_failing_sheet_fails_the_document() {
    let mut source = MockSpreadsheetSource::new();
    source.expect_load_info().returning(|_| Ok(info()));
    source.expect_load_cells().returning(|_, sheet: &SheetInfo| {
        if sheet.sheet_id == 42 {
            Err("quota exceeded".into())
        } else {
            Ok(people_grid())
        }
    });
    source
        .expect_load_rows()
        .returning(|_, _| Ok(SheetRows::default()));

    match assemble(&source, "abc123").await {
        Err(SnapshotError::SourceUnavailable {
            spreadsheet_id,
            reason,
        }) => {
            assert_eq!(spreadsheet_id, "abc123");
            assert!(reason.contains("quota exceeded"));
        }
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn metadata_failure_loads_no_sheets() {
    let mut source = MockSpreadsheetSource::new();
    source
        .expect_load_info()
        .returning(|_| Err("not found".into()));
    source.expect_load_cells().never();
    source.expect_load_rows().never();

    let result = assemble(&source, "missing").await;
    assert!(matches!(
        result,
        Err(SnapshotError::SourceUnavailable { .. })
    ));
}
