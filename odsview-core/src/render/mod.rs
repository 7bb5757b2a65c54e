//! Output formats for extracted tables

use std::path::Path;

pub mod html;
pub mod json;

pub use html::{HtmlOptions, render_html};
pub use json::to_json_pretty;

/// File format written by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
}

impl OutputFormat {
    /// `.json` outputs get JSON, everything else gets HTML
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            OutputFormat::Json
        } else {
            OutputFormat::Html
        }
    }
}
