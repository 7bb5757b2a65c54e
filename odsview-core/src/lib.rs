//! odsview: Core library for turning ODS spreadsheets into tables
//!
//! A spreadsheet is loaded into a [`Document`], reduced to its significant rows by
//! [`extract`], and rendered as HTML or JSON.

pub mod config;
pub mod error;
pub mod extract;
pub mod reader;
pub mod render;
pub mod sample;
pub mod writer;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use config::{ConvertConfig, OdsViewConfig, ServerConfig};
pub use error::{ConfigError, LoadError};
pub use extract::{EmptySheetPolicy, SheetTable, extract};
pub use reader::{Document, load_document, read_document};
pub use render::{HtmlOptions, OutputFormat};

/// Load an ODS file and extract its tables
pub fn read_tables<P: AsRef<Path>>(
    path: P,
    policy: EmptySheetPolicy,
) -> Result<Vec<SheetTable>, LoadError> {
    let document = load_document(path)?;
    Ok(extract(&document, policy))
}

/// Convert `input` into an HTML or JSON file at `output`, chosen by its extension.
///
/// Returns the number of sheets written.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &ConvertConfig,
) -> Result<usize> {
    let input = input.as_ref();
    let output = output.as_ref();

    let tables = read_tables(input, config.empty_sheets)
        .with_context(|| format!("Failed to load spreadsheet: {}", input.display()))?;

    let rendered = match OutputFormat::from_path(output) {
        OutputFormat::Html => {
            let options = HtmlOptions {
                escape: config.escape_html,
                ..HtmlOptions::for_source(input.display())
            };
            render::render_html(&tables, &options)
        }
        OutputFormat::Json => render::to_json_pretty(&tables)?,
    };

    fs::write(output, rendered)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;

    Ok(tables.len())
}
