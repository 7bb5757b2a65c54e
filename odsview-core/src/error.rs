//! Error types for loading spreadsheets and configuration

use std::io;
use thiserror::Error;

/// Errors raised while loading an ODS document.
///
/// Callers at the CLI and HTTP boundaries treat every variant the same way: the document
/// could not be loaded. The variants only exist to give a useful message.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error while reading the file or archive entry.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a readable ZIP archive.
    #[error("ZIP archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// `content.xml` is not well-formed.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The package is an OpenDocument file, but not a spreadsheet.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A required package entry is missing.
    #[error("Missing component: {0}")]
    MissingComponent(&'static str),

    /// Repeated rows, cells or spaces would expand past the given number of bytes.
    #[error("Spreadsheet expands beyond {0} bytes")]
    TooLarge(usize),
}

/// Errors raised while reading `odsview.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
