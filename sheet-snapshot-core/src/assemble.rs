//! Document assembly: loads a spreadsheet through a [`SpreadsheetSource`] and
//! reconciles its two views (logical rows and the raw cell grid) into a
//! [`Document`].

use chrono::Utc;
use futures::future::{try_join, try_join_all};
use tracing::{debug, error, info};

use crate::contract::{SheetInfo, SpreadsheetSource};
use crate::error::{BoxError, SnapshotError};
use crate::model::{Document, Row, Sheet};

/// URL prefix of a spreadsheet link; the id is the next path segment.
pub const SPREADSHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

/// Accepts a bare spreadsheet id or a spreadsheet link and returns the id.
pub fn extract_spreadsheet_id(spreadsheet: &str) -> &str {
    match spreadsheet.strip_prefix(SPREADSHEET_URL_PREFIX) {
        Some(rest) => rest.split('/').next().unwrap_or(rest),
        None => spreadsheet,
    }
}

/// Loads every sheet of a spreadsheet concurrently and assembles the document.
///
/// Returns only once all sheets are populated; the first failing sheet fails
/// the whole document.
pub async fn assemble<S>(source: &S, spreadsheet: &str) -> Result<Document, SnapshotError>
where
    S: SpreadsheetSource + ?Sized,
{
    let spreadsheet_id = extract_spreadsheet_id(spreadsheet);
    let unavailable = |e: BoxError| SnapshotError::SourceUnavailable {
        spreadsheet_id: spreadsheet_id.to_string(),
        reason: e.to_string(),
    };

    info!(spreadsheet_id, "[ASSEMBLE] Loading spreadsheet info");
    let spreadsheet_info = source.load_info(spreadsheet_id).await.map_err(|e| {
        error!(spreadsheet_id, error = %e, "[ASSEMBLE][ERROR] Failed to load spreadsheet info");
        unavailable(e)
    })?;
    let loaded_at = Utc::now();

    let sheets = try_join_all(
        spreadsheet_info
            .sheets
            .iter()
            .map(|sheet| load_sheet(source, spreadsheet_id, sheet)),
    )
    .await
    .map_err(|e| {
        error!(spreadsheet_id, error = %e, "[ASSEMBLE][ERROR] Failed to load sheet");
        unavailable(e)
    })?;

    info!(
        spreadsheet_id,
        title = %spreadsheet_info.title,
        sheets = sheets.len(),
        "[ASSEMBLE] Spreadsheet assembled"
    );
    Ok(Document {
        title: spreadsheet_info.title,
        spreadsheet_id: spreadsheet_id.to_string(),
        loaded_at,
        sheets,
    })
}

async fn load_sheet<S>(source: &S, spreadsheet_id: &str, sheet: &SheetInfo) -> Result<Sheet, BoxError>
where
    S: SpreadsheetSource + ?Sized,
{
    let (grid, sheet_rows) = try_join(
        source.load_cells(spreadsheet_id, sheet),
        source.load_rows(spreadsheet_id, sheet),
    )
    .await?;

    let headers = sheet_rows.header_values.clone().unwrap_or_default();
    let rows: Vec<Row> = sheet_rows
        .rows
        .into_iter()
        .map(|raw| {
            let grid_row = raw.row_number.saturating_sub(1);
            let cells = (0..raw.raw_data.len())
                .map(|column| grid.cell(grid_row, column))
                .collect();
            Row {
                row_number: raw.row_number,
                cells,
                header_values: None,
                values: Row::values_from(&headers, &raw.raw_data),
            }
        })
        .collect();

    debug!(
        spreadsheet_id,
        sheet = %sheet.title,
        sheet_id = sheet.sheet_id,
        rows = rows.len(),
        "[ASSEMBLE] Sheet loaded"
    );
    Ok(Sheet {
        title: sheet.title.clone(),
        sheet_id: sheet.sheet_id,
        header_values: sheet_rows.header_values,
        rows,
    })
}
