//! Spreadsheet to tabular data extraction
//!
//! The extractor walks sheets, rows and cells through the [`TabularDocument`],
//! [`TabularSheet`] and [`TabularRow`] traits, so it does not depend on how a
//! particular reader models the document.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A document exposing its sheets in order
pub trait TabularDocument {
    type Sheet: TabularSheet;

    fn sheets(&self) -> impl Iterator<Item = &Self::Sheet>;
}

/// A named sheet exposing its rows in order
pub trait TabularSheet {
    type Row: TabularRow;

    fn name(&self) -> &str;
    fn rows(&self) -> impl Iterator<Item = &Self::Row>;
}

/// A row exposing the text value of each cell in order
pub trait TabularRow {
    fn cells(&self) -> impl Iterator<Item = Cow<'_, str>>;
}

/// What to do with a sheet that has no significant rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySheetPolicy {
    /// Leave the sheet out of the result
    #[default]
    Omit,
    /// Keep the sheet with an empty `data` list
    Keep,
}

/// Extracted rows of one sheet. Serializes as `{"name": ..., "data": [[...]]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTable {
    pub name: String,
    pub data: Vec<Vec<String>>,
}

impl SheetTable {
    /// First significant row, rendered as the header by the HTML renderer
    pub fn header(&self) -> Option<&[String]> {
        self.data.first().map(Vec::as_slice)
    }

    /// Rows after the header
    pub fn body(&self) -> &[Vec<String>] {
        self.data.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Extract every sheet of `document` as rows of cell strings.
///
/// Rows where every cell is empty are dropped. Row lengths are kept as they are in the
/// source, so the result may be ragged.
pub fn extract<D: TabularDocument>(document: &D, policy: EmptySheetPolicy) -> Vec<SheetTable> {
    document
        .sheets()
        .filter_map(|sheet| {
            let table = extract_sheet(sheet);
            match policy {
                EmptySheetPolicy::Omit if table.is_empty() => None,
                _ => Some(table),
            }
        })
        .collect()
}

/// Extract the significant rows of a single sheet
pub fn extract_sheet<S: TabularSheet>(sheet: &S) -> SheetTable {
    let data = sheet
        .rows()
        .filter_map(|row| {
            let cells: Vec<String> = row.cells().map(Cow::into_owned).collect();
            cells.iter().any(|c| !c.is_empty()).then_some(cells)
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Extracted {} significant row(s) from sheet '{}'",
        data.len(),
        sheet.name()
    );

    SheetTable {
        name: sheet.name().to_string(),
        data,
    }
}
