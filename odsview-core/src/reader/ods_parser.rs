//! ODS parsing: reads sheets, rows and cell text from `content.xml`

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::{BufRead, BufReader, Read, Seek};
use std::{iter, mem};
use zip::ZipArchive;
use zip::result::ZipError;

use super::{Cell, Document, Row, Sheet};
use crate::error::LoadError;

pub const SPREADSHEET_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";
pub const SPREADSHEET_TEMPLATE_MIMETYPE: &str =
    "application/vnd.oasis.opendocument.spreadsheet-template";

/// Upper bound for `number-columns-repeated` / `number-rows-repeated` expansion
pub const REPEAT_LIMIT: u32 = 65_536;

/// Upper bound for the memory a document may produce through repetition
pub const EXPANSION_LIMIT: usize = 128 * 1024 * 1024;

pub struct OdsReader<'a, R: Read + Seek> {
    archive: &'a mut ZipArchive<R>,
}

impl<'a, R: Read + Seek> OdsReader<'a, R> {
    /// Wrap an archive, rejecting OpenDocument packages that are not spreadsheets
    pub fn new(archive: &'a mut ZipArchive<R>) -> Result<Self, LoadError> {
        check_mimetype(archive)?;
        Ok(Self { archive })
    }

    pub fn read_document(&mut self) -> Result<Document, LoadError> {
        let content_xml = match self.archive.by_name("content.xml") {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(LoadError::MissingComponent("content.xml"));
            }
            Err(e) => return Err(e.into()),
        };

        parse_content(BufReader::new(content_xml))
    }
}

/// The `mimetype` entry is optional, but when present it must name a spreadsheet
fn check_mimetype<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<(), LoadError> {
    let mut file = match archive.by_name("mimetype") {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let mut mimetype = String::new();
    file.read_to_string(&mut mimetype)?;
    let mimetype = mimetype.trim();

    if mimetype == SPREADSHEET_MIMETYPE || mimetype == SPREADSHEET_TEMPLATE_MIMETYPE {
        Ok(())
    } else {
        Err(LoadError::UnsupportedFormat(mimetype.to_string()))
    }
}

/// Parse a `content.xml` stream into a [`Document`]
pub fn parse_content<B: BufRead>(input: B) -> Result<Document, LoadError> {
    let mut reader = Reader::from_reader(input);
    // Leading and trailing spaces inside a cell are part of its text
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();
    let mut has_spreadsheet = false;
    let mut state = ContentState::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"office:spreadsheet" => has_spreadsheet = true,
                // Sub-tables inside cells are not sheets
                b"table:table" if state.sheet.is_some() => {
                    skip_element(&mut reader, &e, &mut skip_buf)?;
                }
                b"table:table" => state.start_sheet(&e)?,
                b"table:table-row" if state.sheet.is_some() => state.start_row(&e)?,
                b"table:table-cell" if state.row.is_some() => state.start_cell(&e)?,
                // Merged-cell shadows and comments do not contribute cell text
                b"table:covered-table-cell" | b"office:annotation" => {
                    skip_element(&mut reader, &e, &mut skip_buf)?;
                }
                b"text:p" if state.cell.is_some() => state.start_paragraph(),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"office:spreadsheet" => has_spreadsheet = true,
                b"table:table" if state.sheet.is_none() => {
                    state.start_sheet(&e)?;
                    state.end_sheet();
                }
                b"table:table-row" if state.sheet.is_some() => {
                    state.start_row(&e)?;
                    state.end_row()?;
                }
                b"table:table-cell" if state.row.is_some() => {
                    state.start_cell(&e)?;
                    state.end_cell()?;
                }
                b"text:p" if state.cell.is_some() => {
                    state.start_paragraph();
                    state.end_paragraph();
                }
                b"text:s" if state.in_paragraph() => {
                    let count = attr_value(&e, b"text:c")?
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(1)
                        .min(REPEAT_LIMIT as usize);
                    state.push_spaces(count)?;
                }
                b"text:tab" if state.in_paragraph() => state.push_text("\t"),
                b"text:line-break" if state.in_paragraph() => state.push_text("\n"),
                _ => {}
            },
            Event::Text(t) if state.in_paragraph() => {
                state.push_text(&t.unescape()?);
            }
            Event::CData(t) if state.in_paragraph() => {
                state.push_text(&String::from_utf8_lossy(t.as_ref()));
            }
            Event::End(e) => match e.name().as_ref() {
                b"text:p" => state.end_paragraph(),
                b"table:table-cell" => state.end_cell()?,
                b"table:table-row" => state.end_row()?,
                b"table:table" => state.end_sheet(),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !has_spreadsheet {
        return Err(LoadError::UnsupportedFormat(
            "content.xml has no office:spreadsheet body".to_string(),
        ));
    }

    Ok(Document::new(state.sheets))
}

/// Parser position inside `content.xml`. Rows and cells carry their repeat count.
#[derive(Default)]
struct ContentState {
    sheets: Vec<Sheet>,
    sheet: Option<Sheet>,
    row: Option<(Row, u32)>,
    cell: Option<(Cell, u32)>,
    /// Empty cells of the current row not yet followed by a cell with text
    pending_empty: Vec<(Cell, u32)>,
    paragraph: String,
    paragraph_depth: usize,
    /// Estimated bytes produced by repetition so far, bounded by `EXPANSION_LIMIT`
    expanded: usize,
}

impl ContentState {
    fn start_sheet(&mut self, e: &BytesStart) -> Result<(), LoadError> {
        let name = attr_value(e, b"table:name")?.unwrap_or_default();
        self.sheet = Some(Sheet::new(name));
        Ok(())
    }

    fn end_sheet(&mut self) {
        self.row = None;
        self.cell = None;
        self.pending_empty.clear();
        if let Some(sheet) = self.sheet.take() {
            log::debug!("Read sheet '{}' with {} row(s)", sheet.name, sheet.rows.len());
            self.sheets.push(sheet);
        }
    }

    fn start_row(&mut self, e: &BytesStart) -> Result<(), LoadError> {
        let repeated = repeat_count(e, b"table:number-rows-repeated")?;
        self.row = Some((Row::default(), repeated));
        self.pending_empty.clear();
        Ok(())
    }

    fn end_row(&mut self) -> Result<(), LoadError> {
        // Trailing empty cells are the filler up to the last column
        self.pending_empty.clear();
        let Some((row, repeated)) = self.row.take() else {
            return Ok(());
        };
        if self.sheet.is_none() {
            return Ok(());
        }

        // Blank filler rows are written as one element with a huge repeat count
        let copies = if row.is_significant() {
            repeated as usize
        } else {
            1
        };
        let row_size: usize = row.cells.iter().map(cell_size).sum();
        self.charge(row_size.saturating_mul(copies - 1))?;

        if let Some(sheet) = self.sheet.as_mut() {
            sheet.rows.extend(iter::repeat_n(row, copies));
        }
        Ok(())
    }

    fn start_cell(&mut self, e: &BytesStart) -> Result<(), LoadError> {
        let repeated = repeat_count(e, b"table:number-columns-repeated")?;
        self.cell = Some((Cell::default(), repeated));
        Ok(())
    }

    fn end_cell(&mut self) -> Result<(), LoadError> {
        let Some((cell, repeated)) = self.cell.take() else {
            return Ok(());
        };
        if self.row.is_none() {
            return Ok(());
        }
        if cell.is_empty() {
            self.pending_empty.push((cell, repeated));
            return Ok(());
        }

        // Empty cells before a cell with text keep their columns
        for (empty, count) in std::mem::take(&mut self.pending_empty) {
            self.push_cells(empty, count)?;
        }
        self.push_cells(cell, repeated)
    }

    fn push_cells(&mut self, cell: Cell, copies: u32) -> Result<(), LoadError> {
        let copies = copies as usize;
        self.charge(cell_size(&cell).saturating_mul(copies - 1))?;
        if let Some((row, _)) = self.row.as_mut() {
            row.cells.extend(iter::repeat_n(cell, copies));
        }
        Ok(())
    }

    fn charge(&mut self, bytes: usize) -> Result<(), LoadError> {
        self.expanded = self.expanded.saturating_add(bytes);
        if self.expanded > EXPANSION_LIMIT {
            log::warn!(
                "Refusing to expand repeated content beyond {} bytes",
                EXPANSION_LIMIT
            );
            return Err(LoadError::TooLarge(EXPANSION_LIMIT));
        }
        Ok(())
    }

    fn start_paragraph(&mut self) {
        if self.paragraph_depth == 0 {
            self.paragraph.clear();
        }
        self.paragraph_depth += 1;
    }

    fn end_paragraph(&mut self) {
        if self.paragraph_depth == 0 {
            return;
        }
        self.paragraph_depth -= 1;
        if self.paragraph_depth == 0 {
            if let Some((cell, _)) = self.cell.as_mut() {
                cell.paragraphs.push(std::mem::take(&mut self.paragraph));
            }
        }
    }

    fn in_paragraph(&self) -> bool {
        self.paragraph_depth > 0
    }

    fn push_text(&mut self, text: &str) {
        self.paragraph.push_str(text);
    }

    fn push_spaces(&mut self, count: usize) -> Result<(), LoadError> {
        self.charge(count)?;
        self.paragraph.extend(iter::repeat_n(' ', count));
        Ok(())
    }
}

/// Approximate heap footprint of one cell
fn cell_size(cell: &Cell) -> usize {
    mem::size_of::<Cell>()
        + cell
            .paragraphs
            .iter()
            .map(|p| mem::size_of::<String>() + p.len())
            .sum::<usize>()
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Result<Option<String>, LoadError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn repeat_count(e: &BytesStart, key: &[u8]) -> Result<u32, LoadError> {
    let count = attr_value(e, key)?
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);

    if count > REPEAT_LIMIT {
        log::warn!(
            "Clamping {} of {} to {}",
            String::from_utf8_lossy(key),
            count,
            REPEAT_LIMIT
        );
        return Ok(REPEAT_LIMIT);
    }
    Ok(count)
}

fn skip_element<B: BufRead>(
    reader: &mut Reader<B>,
    start: &BytesStart,
    buf: &mut Vec<u8>,
) -> Result<(), LoadError> {
    let end = start.to_end().into_owned();
    reader.read_to_end_into(end.name(), buf)?;
    buf.clear();
    Ok(())
}
