//! ODS file reader using a custom XML parser

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

pub mod document;
pub mod ods_parser;

pub use document::{Cell, Document, Row, Sheet};
pub use ods_parser::OdsReader;

use crate::error::LoadError;

/// Load an ODS document from a file path
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let document = read_document(BufReader::new(file))?;
    log::debug!(
        "Loaded {} sheet(s) from {}",
        document.sheets.len(),
        path.display()
    );
    Ok(document)
}

/// Load an ODS document from any seekable byte source
pub fn read_document<R: Read + Seek>(reader: R) -> Result<Document, LoadError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut ods = OdsReader::new(&mut archive)?;
    ods.read_document()
}
