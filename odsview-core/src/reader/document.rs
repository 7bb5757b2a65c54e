//! Spreadsheet document data structures

use std::borrow::Cow;

use crate::extract::{TabularDocument, TabularRow, TabularSheet};

/// A loaded spreadsheet: sheets in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sheets: Vec<Sheet>,
}

impl Document {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Build a sheet where every cell holds a single paragraph
    pub fn from_texts<R, C, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            rows: rows.into_iter().map(Row::from_texts).collect(),
        }
    }
}

/// A table row. Cells keep their document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn from_texts<C, S>(cells: C) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Cell::from_text).collect(),
        }
    }

    /// A row is significant when at least one of its cells has text
    pub fn is_significant(&self) -> bool {
        self.cells.iter().any(|c| !c.is_empty())
    }
}

/// A single cell: the text of each `text:p` it contains, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub paragraphs: Vec<String>,
}

impl Cell {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![text.into()],
        }
    }

    pub fn from_paragraphs<P, S>(paragraphs: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }

    /// Concatenated paragraph text, no separator
    pub fn text(&self) -> Cow<'_, str> {
        match self.paragraphs.as_slice() {
            [] => Cow::Borrowed(""),
            [single] => Cow::Borrowed(single.as_str()),
            many => Cow::Owned(many.concat()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.is_empty())
    }
}

impl TabularDocument for Document {
    type Sheet = Sheet;

    fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }
}

impl TabularSheet for Sheet {
    type Row = Row;

    fn name(&self) -> &str {
        &self.name
    }

    fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl TabularRow for Row {
    fn cells(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.cells.iter().map(Cell::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_concatenates_paragraphs() {
        let cell = Cell::from_paragraphs(["Hello", " World"]);
        assert_eq!(cell.text(), "Hello World");
        assert!(matches!(Cell::from_text("x").text(), Cow::Borrowed(_)));
        assert_eq!(Cell::default().text(), "");
    }

    #[test]
    fn test_row_significance() {
        assert!(!Row::default().is_significant());
        assert!(!Row::from_texts(["", ""]).is_significant());
        assert!(Row::from_texts(["", "x"]).is_significant());
        // A cell made only of empty paragraphs is empty
        let row = Row {
            cells: vec![Cell::from_paragraphs(["", ""])],
        };
        assert!(!row.is_significant());
    }

    #[test]
    fn test_sheet_names_keep_duplicates() {
        let doc = Document::new(vec![Sheet::new("A"), Sheet::new("B"), Sheet::new("A")]);
        assert_eq!(doc.sheet_names(), vec!["A", "B", "A"]);
    }
}
