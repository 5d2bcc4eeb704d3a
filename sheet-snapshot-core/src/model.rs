//! Plain data describing one loaded spreadsheet snapshot.
//!
//! A [`Document`] is built once per run by [`crate::assemble::assemble`],
//! handed to the renderers by reference and then dropped. Nothing here is
//! mutated after assembly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One assembled spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub spreadsheet_id: String,
    pub loaded_at: DateTime<Utc>,
    pub sheets: Vec<Sheet>,
}

/// One tab of a spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub title: String,
    pub sheet_id: i64,
    /// Values of the header row, or `None` when the sheet has no header row.
    pub header_values: Option<Vec<String>>,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Column count used for placeholder headers: the width of the first row.
    pub fn fallback_width(&self) -> usize {
        self.rows.first().map(|row| row.cells.len()).unwrap_or(0)
    }
}

/// One data row (the header row is not a `Row`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// 1-based row number within the sheet.
    pub row_number: usize,
    pub cells: Vec<Cell>,
    /// Per-row header names that take precedence over the sheet's header row.
    /// Set through [`Row::override_headers`] so that `values` follows them.
    pub header_values: Option<Vec<String>>,
    /// Header name to the row's logical value in that column.
    pub values: HashMap<String, String>,
}

impl Row {
    /// Builds the header-keyed values from the row's logical data.
    ///
    /// Empty header names are skipped. When a header name repeats, the
    /// right-most column wins.
    pub fn values_from(headers: &[String], raw_data: &[String]) -> HashMap<String, String> {
        let mut values = HashMap::new();
        for (header, value) in headers.iter().zip(raw_data) {
            if header.is_empty() {
                continue;
            }
            values.insert(header.clone(), value.clone());
        }
        values
    }

    /// Gives the row its own header names and re-keys `values` by them.
    pub fn override_headers(&mut self, headers: Vec<String>, raw_data: &[String]) {
        self.values = Row::values_from(&headers, raw_data);
        self.header_values = Some(headers);
    }
}

/// One grid position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub formatted_value: Option<String>,
    pub raw_value: Option<serde_json::Value>,
    pub hyperlink: Option<String>,
    pub style: CellStyle,
}

impl Cell {
    /// Formatted text, treating an empty string like a missing one.
    pub fn text(&self) -> Option<&str> {
        self.formatted_value.as_deref().filter(|s| !s.is_empty())
    }

    pub fn link(&self) -> Option<&str> {
        self.hyperlink.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub background_color: Option<Color>,
    pub foreground_color: Option<Color>,
}

/// A color as the spreadsheet API reports it: channels in `[0, 1]`, with
/// zero-valued channels usually left out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<f64>,
}

/// A color with every channel resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
        }
    }

    /// Resolves missing channels.
    ///
    /// A missing or zero red channel takes green's value: the API hands out
    /// `{ green: 1, blue: 1 }` for white. Missing green and blue read as 0.
    pub fn normalized(&self) -> Rgb {
        let green = self.green.unwrap_or(0.0);
        let blue = self.blue.unwrap_or(0.0);
        let red = match self.red {
            Some(red) if red != 0.0 => red,
            _ => green,
        };
        Rgb { red, green, blue }
    }

    /// True when the red channel is present and non-zero.
    pub fn has_red(&self) -> bool {
        matches!(self.red, Some(red) if red != 0.0)
    }
}

/// Switches for the optional parts of the Markdown and HTML output.
///
/// Both flags default to `true`; only an explicit `false` drops the part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Append the "Generated from" source footer.
    #[serde(default = "default_true", alias = "nosource")]
    pub no_source: bool,
    /// Put the spreadsheet logo in the HTML title.
    #[serde(default = "default_true", alias = "nologo")]
    pub no_logo: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            no_source: true,
            no_logo: true,
        }
    }
}
