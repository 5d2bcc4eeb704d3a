//! Spreadsheet source backed by the Google Sheets v4 REST API.
//!
//! Implements [`SpreadsheetSource`] with three read-only calls authenticated
//! by an API key:
//! - metadata: `GET /v4/spreadsheets/{id}` (title and sheet list)
//! - cells: `GET /v4/spreadsheets/{id}?ranges='{sheet}'&includeGridData=true`
//! - rows: `GET /v4/spreadsheets/{id}/values/'{sheet}'`
//!
//! Construct with [`GoogleSheetsClient::new_from_env`] (`GOOGLE_API_KEY`,
//! optional `GOOGLE_SHEETS_API_URL`) or [`GoogleSheetsClient::new`].

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::env;

use sheet_snapshot_core::contract::{
    CellGrid, RawRow, SheetInfo, SheetRows, SpreadsheetInfo, SpreadsheetSource,
};
use sheet_snapshot_core::error::BoxError;
use sheet_snapshot_core::model::{Cell, CellStyle, Color};

pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

const INFO_FIELDS: &str = "properties.title,sheets.properties(sheetId,title,index)";
const GRID_FIELDS: &str = "sheets.data(startRow,startColumn,rowData.values(formattedValue,effectiveValue,hyperlink,effectiveFormat(backgroundColor,textFormat)))";

pub struct GoogleSheetsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GoogleSheetsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn new_from_env() -> Result<Self, BoxError> {
        let api_key = env::var("GOOGLE_API_KEY").map_err(|e| {
            tracing::error!(error = ?e, "GOOGLE_API_KEY missing in environment");
            e
        })?;
        let base_url =
            env::var("GOOGLE_SHEETS_API_URL").unwrap_or_else(|_| DEFAULT_SHEETS_API_URL.to_string());
        tracing::info!(base_url = %base_url, "Initialized GoogleSheetsClient from environment");
        Ok(Self::new(base_url, api_key))
    }

    fn url(&self, segments: &[&str]) -> Result<Url, BoxError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| format!("cannot use {} as a base URL", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, BoxError> {
        let response = self
            .http
            .get(url.clone())
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, path = url.path(), "Sheets API returned error");
            return Err(format!("Sheets API {} returned {status}: {body}", url.path()).into());
        }
        Ok(response.json::<T>().await?)
    }
}

/// A1 range covering a whole sheet.
fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[derive(Debug, Deserialize)]
struct ApiSpreadsheet {
    #[serde(default)]
    properties: ApiSpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<ApiSheet>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSpreadsheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiSheet {
    #[serde(default)]
    properties: Option<ApiSheetProperties>,
    #[serde(default)]
    data: Vec<ApiGridData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSheetProperties {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiGridData {
    #[serde(default)]
    start_row: usize,
    #[serde(default)]
    start_column: usize,
    #[serde(default)]
    row_data: Vec<ApiRowData>,
}

#[derive(Debug, Deserialize)]
struct ApiRowData {
    #[serde(default)]
    values: Vec<ApiCellData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCellData {
    formatted_value: Option<String>,
    effective_value: Option<ApiExtendedValue>,
    hyperlink: Option<String>,
    effective_format: Option<ApiCellFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiExtendedValue {
    number_value: Option<f64>,
    string_value: Option<String>,
    bool_value: Option<bool>,
    error_value: Option<ApiErrorValue>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorValue {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCellFormat {
    background_color: Option<Color>,
    #[serde(default)]
    text_format: ApiTextFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTextFormat {
    foreground_color: Option<Color>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    strikethrough: bool,
    #[serde(default)]
    underline: bool,
}

#[derive(Debug, Deserialize)]
struct ApiValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl ApiExtendedValue {
    fn into_value(self) -> Option<Value> {
        if let Some(n) = self.number_value {
            return serde_json::Number::from_f64(n).map(Value::Number);
        }
        if let Some(s) = self.string_value {
            return Some(Value::String(s));
        }
        if let Some(b) = self.bool_value {
            return Some(Value::Bool(b));
        }
        self.error_value
            .map(|e| Value::String(e.kind.unwrap_or_else(|| "ERROR".to_string())))
    }
}

impl From<ApiCellData> for Cell {
    fn from(data: ApiCellData) -> Self {
        let style = match data.effective_format {
            Some(format) => CellStyle {
                bold: format.text_format.bold,
                italic: format.text_format.italic,
                underline: format.text_format.underline,
                strikethrough: format.text_format.strikethrough,
                background_color: format.background_color,
                foreground_color: format.text_format.foreground_color,
            },
            None => CellStyle::default(),
        };
        Cell {
            formatted_value: data.formatted_value,
            raw_value: data.effective_value.and_then(ApiExtendedValue::into_value),
            hyperlink: data.hyperlink,
            style,
        }
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SpreadsheetSource for GoogleSheetsClient {
    async fn load_info(&self, spreadsheet_id: &str) -> Result<SpreadsheetInfo, BoxError> {
        tracing::info!(spreadsheet_id, "Fetching spreadsheet metadata");
        let url = self.url(&["v4", "spreadsheets", spreadsheet_id])?;
        let api: ApiSpreadsheet = self.get_json(url, &[("fields", INFO_FIELDS)]).await?;
        let sheets = api
            .sheets
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .map(|properties| SheetInfo {
                sheet_id: properties.sheet_id,
                title: properties.title,
            })
            .collect();
        Ok(SpreadsheetInfo {
            title: api.properties.title,
            sheets,
        })
    }

    async fn load_cells(
        &self,
        spreadsheet_id: &str,
        sheet: &SheetInfo,
    ) -> Result<CellGrid, BoxError> {
        tracing::debug!(spreadsheet_id, sheet = %sheet.title, "Fetching cell grid");
        let url = self.url(&["v4", "spreadsheets", spreadsheet_id])?;
        let range = sheet_range(&sheet.title);
        let api: ApiSpreadsheet = self
            .get_json(
                url,
                &[
                    ("includeGridData", "true"),
                    ("ranges", range.as_str()),
                    ("fields", GRID_FIELDS),
                ],
            )
            .await?;

        let mut grid = CellGrid::default();
        for data in api.sheets.into_iter().flat_map(|sheet| sheet.data) {
            for (offset, row_data) in data.row_data.into_iter().enumerate() {
                let row_index = data.start_row + offset;
                if grid.rows.len() <= row_index {
                    grid.rows.resize_with(row_index + 1, Vec::new);
                }
                let row = &mut grid.rows[row_index];
                for (column_offset, cell) in row_data.values.into_iter().enumerate() {
                    let column = data.start_column + column_offset;
                    if row.len() <= column {
                        row.resize_with(column + 1, Cell::default);
                    }
                    row[column] = cell.into();
                }
            }
        }
        Ok(grid)
    }

    async fn load_rows(
        &self,
        spreadsheet_id: &str,
        sheet: &SheetInfo,
    ) -> Result<SheetRows, BoxError> {
        tracing::debug!(spreadsheet_id, sheet = %sheet.title, "Fetching sheet rows");
        let range = sheet_range(&sheet.title);
        let url = self.url(&["v4", "spreadsheets", spreadsheet_id, "values", range.as_str()])?;
        let api: ApiValueRange = self.get_json(url, &[]).await?;

        let mut values = api.values.into_iter();
        let header_values = values
            .next()
            .map(|header| header.into_iter().map(value_text).collect::<Vec<_>>())
            .filter(|header| header.iter().any(|h| !h.is_empty()));
        // data rows start below the header row
        let rows = values
            .enumerate()
            .map(|(index, raw)| RawRow {
                row_number: index + 2,
                raw_data: raw.into_iter().map(value_text).collect(),
            })
            .collect();
        Ok(SheetRows {
            header_values,
            rows,
        })
    }
}
