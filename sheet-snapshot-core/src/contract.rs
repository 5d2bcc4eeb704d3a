#![allow(unused)]

//! # contract: the seams between the pipeline and the outside world
//!
//! Two async traits describe everything the pipeline needs from remote
//! services:
//! - [`SpreadsheetSource`]: spreadsheet metadata, cell grids and logical rows.
//! - [`ContentStore`]: read and create-or-update of a file in a repository.
//!
//! Real clients live in the CLI crate. Tests use the `mockall` mocks
//! generated here (`MockSpreadsheetSource`, `MockContentStore`), exported
//! under the `test-export-mocks` feature so downstream crates can use them too.
//!
//! All request/response types are plain data.

use async_trait::async_trait;
use mockall::{automock, predicate::*};
use serde::Serialize;

use crate::error::BoxError;
use crate::location::RemoteLocation;
use crate::model::Cell;

/// Spreadsheet metadata: its title and the list of its sheets, in tab order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetInfo {
    pub title: String,
    pub sheets: Vec<SheetInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetInfo {
    pub sheet_id: i64,
    pub title: String,
}

/// The full cell grid of one sheet, row-major, 0-based.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellGrid {
    pub rows: Vec<Vec<Cell>>,
}

impl CellGrid {
    /// The cell at a grid position; positions outside the loaded grid are empty cells.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .cloned()
            .unwrap_or_default()
    }
}

/// The logical view of one sheet: header row plus data rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetRows {
    pub header_values: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
}

/// One data row as the values API returns it (trailing empty values trimmed).
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based row number within the sheet.
    pub row_number: usize,
    pub raw_data: Vec<String>,
}

/// Read access to a spreadsheet service.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SpreadsheetSource: Send + Sync {
    /// Fetch the spreadsheet's title and sheet list.
    async fn load_info(&self, spreadsheet_id: &str) -> Result<SpreadsheetInfo, BoxError>;

    /// Fetch every cell of one sheet, with formatting and hyperlinks.
    async fn load_cells(&self, spreadsheet_id: &str, sheet: &SheetInfo)
        -> Result<CellGrid, BoxError>;

    /// Fetch the header row and the data rows of one sheet.
    async fn load_rows(&self, spreadsheet_id: &str, sheet: &SheetInfo)
        -> Result<SheetRows, BoxError>;
}

/// Answer to a contents read. `entry` is set when the status is 200.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentsResponse {
    pub status: u16,
    pub entry: Option<ContentEntry>,
}

/// What the store holds at a path.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    /// `file`, `dir`, `symlink`, `submodule`.
    pub kind: String,
    pub sha: Option<String>,
}

/// Body of a create-or-update write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutContents {
    pub message: String,
    /// Base64 of the new file content.
    pub content: String,
    /// Identifier of the content being replaced; absent when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub branch: String,
}

/// A version-controlled file store addressed by repository and path.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read what is stored at `location`. Non-2xx statuses are answers, not errors.
    async fn get_contents(&self, location: &RemoteLocation) -> Result<ContentsResponse, BoxError>;

    /// Create or update the file at `location`, returning the response status.
    async fn put_contents(&self, location: &RemoteLocation, body: PutContents)
        -> Result<u16, BoxError>;
}
