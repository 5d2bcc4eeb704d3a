//! Renderers: pure functions from a [`Document`] to one output format.
//!
//! - [`render_markdown`]: pipe tables, one per sheet.
//! - [`render_html`]: standalone page with per-cell styling.
//! - [`render_record`] / [`render_json`]: nested record of rows and header-keyed data.
//!
//! [`render`] dispatches on an [`OutputFormat`].

mod html;
mod json;
mod markdown;

pub use html::{css_color, render_html, to_precision};
pub use json::{render_json, render_record, DocumentRecord, SheetRecord};
pub use markdown::render_markdown;

use crate::error::SnapshotError;
use crate::location::OutputFormat;
use crate::model::{Document, RenderOptions};

/// Fixed link to the spreadsheet shown in the source footers.
pub fn source_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}/")
}

/// Renders `document` in the given format.
pub fn render(
    format: OutputFormat,
    document: &Document,
    options: &RenderOptions,
) -> Result<String, SnapshotError> {
    match format {
        OutputFormat::Json => render_json(document),
        OutputFormat::Markdown => Ok(render_markdown(document, options)),
        OutputFormat::Html => Ok(render_html(document, options)),
    }
}
