use crate::model::{Cell, Color, Document, RenderOptions};

use super::source_url;

const STYLE: &str = "<style>body {margin: 5ex;}th,td{border:1px solid black;padding:.5ex;}th{border:2px solid black;}td.empty{border:none;}table{border-collapse:collapse}\
h2 > a.self-link::before{ content: \"§\"; color: inherit; font-size: 83%; margin-left: -1em; opacity: 0.5; padding-right: 1ex; text-decoration: none}</style>\n";

const LOGO: &str = concat!(
    r##"<svg xmlns="http://www.w3.org/2000/svg" style="display:inline" version="1.1" width="40px" height="40px" x="0" y="0" viewBox="0 0 40 40" preserveAspectRatio="none">"##,
    r##"<defs>"##,
    r##"<linearGradient id="a" x1="50.005%" x2="50.005%" y1="8.586%" y2="100.014%">"##,
    r##"<stop stop-color="#263238" stop-opacity=".2" offset="0%"/><stop stop-color="#263238" stop-opacity=".02" offset="100%"/>"##,
    r##"</linearGradient>"##,
    r##"<radialGradient id="b" cx="3.168%" cy="2.718%" r="161.248%" fx="3.168%" fy="2.718%" gradientTransform="matrix(1 0 0 .72222 0 .008)"><stop stop-color="#FFF" offset="0%"/>"##,
    r##"<stop stop-color="#FFF" stop-opacity="0" offset="100%"/></radialGradient>"##,
    r##"</defs>"##,
    r##"<g fill="none" fill-rule="evenodd">"##,
    r##"<path fill="#0F9D58" d="M9.5 2H24l9 9v24.5c0 1.3807119-1.1192881 2.5-2.5 2.5h-21C8.11928813 38 7 36.8807119 7 35.5v-31C7 3.11928813 8.11928813 2 9.5 2z"/>"##,
    r##"<path fill="#263238" fill-opacity=".1" d="M7 35c0 1.3807119 1.11928813 2.5 2.5 2.5h21c1.3807119 0 2.5-1.1192881 2.5-2.5v.5c0 1.3807119-1.1192881 2.5-2.5 2.5h-21C8.11928813 38 7 36.8807119 7 35.5V35z"/>"##,
    r##"<path fill="#FFF" fill-opacity=".2" d="M9.5 2H24v.5H9.5C8.11928813 2.5 7 3.61928813 7 5v-.5C7 3.11928813 8.11928813 2 9.5 2z"/><path fill="url(#a)" fill-rule="nonzero" d="M17.5 8l8.5 8.5V9" transform="translate(7 2)"/>"##,
    r##"<path fill="#87CEAC" d="M24 2l9 9h-6.5C25.1192881 11 24 9.88071187 24 8.5V2z"/><path fill="#F1F1F1" d="M13 18h14v14H13V18zm2 2v2h4v-2h-4zm0 4v2h4v-2h-4zm0 4v2h4v-2h-4zm6-8v2h4v-2h-4zm0 4v2h4v-2h-4zm0 4v2h4v-2h-4z"/>"##,
    r##"<path fill="white" fill-opacity=".1" d="M2.5 0H17l9 9v24.5c0 1.3807119-1.1192881 2.5-2.5 2.5h-21C1.11928813 36 0 34.8807119 0 33.5v-31C0 1.11928813 1.11928813 0 2.5 0z" transform="translate(7 2)"/>"##,
    r##"</g></svg>"##,
);

const NBSP: &str = "&nbsp;";

/// Formats `value` with `precision` significant digits, the way
/// ECMAScript's `Number.prototype.toPrecision` does (ties round up,
/// exponent notation below 1e-6 or at or above 10^precision).
pub fn to_precision(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return if precision == 1 {
            "0".to_string()
        } else {
            format!("0.{}", "0".repeat(precision - 1))
        };
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let x = value.abs();
    let p = precision as i32;
    let scaled = |e: i32| {
        let k = e - p + 1;
        if k < 0 {
            (x * 10f64.powi(-k)).round()
        } else {
            (x / 10f64.powi(k)).round()
        }
    };

    let mut e = x.log10().floor() as i32;
    let mut n = scaled(e);
    if n >= 10f64.powi(p) {
        e += 1;
        n = scaled(e);
    } else if n < 10f64.powi(p - 1) {
        e -= 1;
        n = scaled(e);
    }
    let digits = format!("{:.0}", n);

    let body = if e < -6 || e >= p {
        let mantissa = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits.clone()
        };
        let exp_sign = if e < 0 { '-' } else { '+' };
        format!("{mantissa}e{exp_sign}{}", e.abs())
    } else if e == p - 1 {
        digits
    } else if e >= 0 {
        let split = (e + 1) as usize;
        format!("{}.{}", &digits[..split], &digits[split..])
    } else {
        format!("0.{}{}", "0".repeat((-e - 1) as usize), digits)
    };
    format!("{sign}{body}")
}

/// CSS color for a spreadsheet color: `white`, `black`, or percentage `rgb()`.
pub fn css_color(color: &Color) -> String {
    let rgb = color.normalized();
    if rgb.red == 1.0 && rgb.green == 1.0 && rgb.blue == 1.0 {
        return "white".to_string();
    }
    if rgb.red == 0.0 && rgb.green == 0.0 && rgb.blue == 0.0 {
        return "black".to_string();
    }
    format!(
        "rgb({}% {}% {}%)",
        to_precision(rgb.red * 100.0, 3),
        to_precision(rgb.green * 100.0, 3),
        to_precision(rgb.blue * 100.0, 3)
    )
}

fn cell_style(cell: &Cell) -> String {
    let format = &cell.style;
    let mut style = String::new();
    if format.italic {
        style.push_str("font-style:italic;");
    }
    if format.bold {
        style.push_str("font-weight:bold;");
    }
    if format.strikethrough {
        style.push_str("text-decoration:line-through;");
    } else if format.underline {
        style.push_str("text-decoration:underline;");
    }
    if let Some(background) = &format.background_color {
        let color = css_color(background);
        if color != "white" {
            style.push_str(&format!("background-color:{color};"));
        }
    }
    if let Some(foreground) = format.foreground_color.as_ref().filter(|c| c.has_red()) {
        let color = css_color(foreground);
        if color != "black" {
            style.push_str(&format!("color:{color};"));
        }
    }
    style
}

fn header_text(header: &str) -> String {
    let text = header.trim().replace('\n', "<br />");
    if text.starts_with("https://") {
        return match text.find(' ') {
            Some(index) => format!("<a href='{}'>{}</a>", &text[..index], &text[index..]),
            None => format!("<a href='{}'>{}</a>", text, &text["https://".len()..]),
        };
    }
    text
}

fn render_cell(cell: &Cell) -> String {
    let style = cell_style(cell);
    let style = if style.is_empty() {
        style
    } else {
        format!(" style=\"{style}\"")
    };
    let mut content = cell.text().unwrap_or(NBSP).to_string();
    if let Some(link) = cell.link() {
        content = format!("<a href=\"{link}\">{content}</a>");
    }
    format!("<td{style}>{content}</td>")
}

pub fn render_html(document: &Document, options: &RenderOptions) -> String {
    let mut text = format!(
        "<html><head><meta charset=utf-8><title>{}</title>\n",
        document.title
    );
    text.push_str(STYLE);
    text.push_str("</head><body>\n<h1>");
    if options.no_logo {
        text.push_str(LOGO);
        text.push_str(&format!(
            "<span  style=\"vertical-align: top\">{}</span>",
            document.title
        ));
    } else {
        text.push_str(&document.title);
    }
    text.push_str("</h1>\n");

    for sheet in &document.sheets {
        text.push_str(&format!(
            "\n<h2 id='sheet{id}'><a class='self-link' aria-label='§' href='#sheet{id}'></a>{title}</h2>\n\n<table><thead><tr>",
            id = sheet.sheet_id,
            title = sheet.title
        ));
        let headers: Vec<String> = match &sheet.header_values {
            Some(headers) => headers.iter().map(|h| header_text(h)).collect(),
            None => vec![NBSP.to_string(); sheet.fallback_width()],
        };
        text.push_str(&format!("<th>{}</th></tr>\n", headers.join("</th><th>")));
        text.push_str("</thead>\n<tbody>\n");

        for row in &sheet.rows {
            text.push_str("<tr>");
            for cell in &row.cells {
                text.push_str(&render_cell(cell));
            }
            if row.cells.is_empty() {
                text.push_str("<td class='empty'>&nbsp;</td>");
            }
            text.push_str("</tr>\n");
        }
        text.push_str("</tbody>\n</table>\n");
    }

    if options.no_source {
        text.push_str(&format!(
            "<hr><p>Generated from a <a href=\"{}\">google spreadsheet</a>.</p>\n",
            source_url(&document.spreadsheet_id)
        ));
    }
    text.push_str("</body></html>");
    text
}
