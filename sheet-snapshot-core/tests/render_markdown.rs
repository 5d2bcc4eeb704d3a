mod common;

use common::{cell, document, linked, roster, row, sheet};
use sheet_snapshot_core::model::RenderOptions;
use sheet_snapshot_core::render::render_markdown;

#[test]
fn renders_title_sheet_table_and_source_footer() {
    let text = render_markdown(&roster(), &RenderOptions::default());

    let expected = "# Roster\n\
\n\
## People\n\
\n\
| Name | URL |\n\
| -- | -- |\n\
| Alice | [https://x](site)  |\n\
\n\
<hr>\n\
\n\
Generated from a [Google spreadsheet](https://docs.google.com/spreadsheets/d/X/)\n";
    assert_eq!(text, expected);
}

#[test]
fn footer_is_dropped_only_when_no_source_is_false() {
    let options = RenderOptions {
        no_source: false,
        ..Default::default()
    };
    let text = render_markdown(&roster(), &options);
    assert!(!text.contains("Generated from"), "got: {text}");
    assert!(text.ends_with("| Alice | [https://x](site)  |\n"));
}

#[test]
fn pipes_and_newlines_stay_inside_their_cell() {
    let headers = ["Col|umn", "Notes"];
    let doc = document(vec![sheet(
        "S",
        1,
        Some(&headers[..]),
        vec![row(
            2,
            &headers,
            vec![cell("a|b\nc"), linked("x|y", "https://e.com/a|b")],
        )],
    )]);
    let text = render_markdown(&doc, &RenderOptions::default());

    assert!(text.contains("| Col--umn | Notes |\n"), "got: {text}");
    // the link target is left as it is
    assert!(
        text.contains("| a--b<br />c | [https://e.com/a|b](x--y)  |\n"),
        "got: {text}"
    );
    assert!(!text.contains("a|b\nc"));
}

#[test]
fn headerless_sheet_gets_blank_header_sized_to_first_row() {
    let doc = document(vec![sheet(
        "Raw",
        3,
        None,
        vec![row(1, &[], vec![cell("1"), cell("2")])],
    )]);
    let text = render_markdown(&doc, &RenderOptions::default());
    assert!(
        text.contains("## Raw\n\n|   |   |\n| -- | -- |\n| 1 | 2  |\n"),
        "got: {text}"
    );
}

#[test]
fn empty_sheet_still_gets_heading_and_header_row() {
    let headers = ["A", "B"];
    let doc = document(vec![sheet("Empty", 9, Some(&headers[..]), vec![])]);
    let text = render_markdown(&doc, &RenderOptions::default());
    assert!(text.contains("## Empty\n\n| A | B |\n| -- | -- |\n"), "got: {text}");
}

#[test]
fn row_without_cells_renders_closing_marker_only() {
    let headers = ["A"];
    let doc = document(vec![sheet(
        "S",
        0,
        Some(&headers[..]),
        vec![row(2, &headers, vec![])],
    )]);
    let text = render_markdown(&doc, &RenderOptions::default());
    assert!(text.contains("| A |\n| -- |\n |\n"), "got: {text}");
}
