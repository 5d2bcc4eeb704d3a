use crate::model::{Document, RenderOptions};

use super::source_url;

/// Keeps cell text inside its table cell.
fn escape(text: &str) -> String {
    text.replace('|', "--").replace('\n', "<br />")
}

fn table_row<I>(cells: I) -> String
where
    I: IntoIterator<Item = String>,
{
    format!("| {} |\n", cells.into_iter().collect::<Vec<_>>().join(" | "))
}

pub fn render_markdown(document: &Document, options: &RenderOptions) -> String {
    let mut text = format!("# {}\n", document.title);

    for sheet in &document.sheets {
        text.push_str(&format!("\n## {}\n\n", sheet.title));

        match &sheet.header_values {
            Some(headers) => {
                text.push_str(&table_row(headers.iter().map(|h| escape(h))));
                text.push_str(&table_row(headers.iter().map(|_| "--".to_string())));
            }
            None => {
                let width = sheet.fallback_width();
                text.push_str(&table_row((0..width).map(|_| " ".to_string())));
                text.push_str(&table_row((0..width).map(|_| "--".to_string())));
            }
        }

        for row in &sheet.rows {
            for cell in &row.cells {
                let mut content = escape(cell.text().unwrap_or(""));
                // link target first, then the text
                if let Some(link) = cell.link() {
                    content = format!("[{link}]({content})");
                }
                text.push_str(&format!("| {content} "));
            }
            text.push_str(" |\n");
        }
    }

    if options.no_source {
        text.push_str(&format!(
            "\n<hr>\n\nGenerated from a [Google spreadsheet]({})\n",
            source_url(&document.spreadsheet_id)
        ));
    }
    text
}
