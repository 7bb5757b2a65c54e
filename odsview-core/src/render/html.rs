//! HTML output: one heading and table per sheet

use quick_xml::escape::escape;
use std::borrow::Cow;
use std::fmt::Display;

use crate::extract::SheetTable;

const STYLE_RULES: [&str; 6] = [
    "body { font-family: Arial, sans-serif; margin: 20px; }",
    "table { border-collapse: collapse; width: 100%; margin: 20px 0; }",
    "th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }",
    "th { background-color: #4CAF50; color: white; }",
    "tr:nth-child(even) { background-color: #f2f2f2; }",
    "h2 { color: #333; margin-top: 30px; }",
];

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub title: String,
    /// Escape sheet names and cell text. With `false`, cell content is emitted as raw
    /// markup, so a cell containing `<script>` ends up in the page.
    pub escape: bool,
}

impl HtmlOptions {
    /// Options for a page titled after the source file
    pub fn for_source(source: impl Display) -> Self {
        Self {
            title: format!("Tables from {source}"),
            escape: true,
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "Tables".to_string(),
            escape: true,
        }
    }
}

fn text(raw: &str, escape_markup: bool) -> Cow<'_, str> {
    if escape_markup {
        escape(raw)
    } else {
        Cow::Borrowed(raw)
    }
}

/// Render `tables` as a standalone HTML page.
///
/// The first row of each sheet goes into `<thead>`, the rest into `<tbody>`. A sheet
/// without rows still gets its heading and an empty table.
pub fn render_html(tables: &[SheetTable], options: &HtmlOptions) -> String {
    let esc = options.escape;
    let mut parts: Vec<String> = vec![
        "<!DOCTYPE html>".into(),
        r#"<html lang="en">"#.into(),
        "<head>".into(),
        r#"    <meta charset="UTF-8">"#.into(),
        r#"    <meta name="viewport" content="width=device-width, initial-scale=1.0">"#.into(),
        format!("    <title>{}</title>", text(&options.title, esc)),
        "    <style>".into(),
    ];
    parts.extend(STYLE_RULES.iter().map(|rule| format!("        {rule}")));
    parts.push("    </style>".into());
    parts.push("</head>".into());
    parts.push("<body>".into());

    for table in tables {
        parts.push(format!("    <h2>{}</h2>", text(&table.name, esc)));
        parts.push("    <table>".into());

        if let Some(header) = table.header() {
            parts.push("        <thead>".into());
            parts.push("            <tr>".into());
            for cell in header {
                parts.push(format!("                <th>{}</th>", text(cell, esc)));
            }
            parts.push("            </tr>".into());
            parts.push("        </thead>".into());
        }

        parts.push("        <tbody>".into());
        for row in table.body() {
            parts.push("            <tr>".into());
            for cell in row {
                parts.push(format!("                <td>{}</td>", text(cell, esc)));
            }
            parts.push("            </tr>".into());
        }
        parts.push("        </tbody>".into());
        parts.push("    </table>".into());
    }

    parts.push("</body>".into());
    parts.push("</html>".into());
    parts.join("\n")
}
