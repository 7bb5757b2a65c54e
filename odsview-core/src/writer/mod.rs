// ! Writer module for producing ODS files

mod ods_writer;

pub use ods_writer::{write_document, write_document_to_path};
