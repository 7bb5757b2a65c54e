// ! ODS writer: packages a document as a minimal OpenDocument spreadsheet

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::reader::ods_parser::SPREADSHEET_MIMETYPE;
use crate::reader::{Cell, Document};

const ODF_VERSION: &str = "1.2";
const NS_OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
const NS_TABLE: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
const NS_TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";

const MANIFEST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
 <manifest:file-entry manifest:full-path="styles.xml" manifest:media-type="text/xml"/>
 <manifest:file-entry manifest:full-path="meta.xml" manifest:media-type="text/xml"/>
</manifest:manifest>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" office:version="1.2"/>"#;

/// Write `document` as an ODS package into `output`, returning the writer
pub fn write_document<W: Write + Seek>(document: &Document, output: W) -> Result<W> {
    let mut zip = ZipWriter::new(output);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    // ODF requires mimetype first and uncompressed
    zip.start_file("mimetype", stored)?;
    zip.write_all(SPREADSHEET_MIMETYPE.as_bytes())?;

    zip.start_file("META-INF/manifest.xml", deflated)?;
    zip.write_all(MANIFEST_XML.as_bytes())?;

    zip.start_file("meta.xml", deflated)?;
    zip.write_all(meta_xml().as_bytes())?;

    zip.start_file("styles.xml", deflated)?;
    zip.write_all(STYLES_XML.as_bytes())?;

    zip.start_file("content.xml", deflated)?;
    zip.write_all(&content_xml(document)?)?;

    Ok(zip.finish()?)
}

/// Write `document` as an ODS file at `path`
pub fn write_document_to_path<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = write_document(document, BufWriter::new(file))?;
    writer.flush()?;
    Ok(())
}

fn meta_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="{NS_OFFICE}" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0" office:version="{ODF_VERSION}"><office:meta><meta:generator>odsview/{}</meta:generator></office:meta></office:document-meta>"#,
        env!("CARGO_PKG_VERSION")
    )
}

fn content_xml(document: &Document) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = BytesStart::new("office:document-content").with_attributes([
        ("xmlns:office", NS_OFFICE),
        ("xmlns:table", NS_TABLE),
        ("xmlns:text", NS_TEXT),
        ("office:version", ODF_VERSION),
    ]);
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("office:body")))?;
    writer.write_event(Event::Start(BytesStart::new("office:spreadsheet")))?;

    for sheet in &document.sheets {
        let table =
            BytesStart::new("table:table").with_attributes([("table:name", sheet.name.as_str())]);
        writer.write_event(Event::Start(table))?;

        for row in &sheet.rows {
            writer.write_event(Event::Start(BytesStart::new("table:table-row")))?;
            for cell in &row.cells {
                write_cell(&mut writer, cell)?;
            }
            writer.write_event(Event::End(BytesEnd::new("table:table-row")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("table:table")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("office:spreadsheet")))?;
    writer.write_event(Event::End(BytesEnd::new("office:body")))?;
    writer.write_event(Event::End(BytesEnd::new("office:document-content")))?;

    Ok(writer.into_inner())
}

fn write_cell(writer: &mut Writer<Vec<u8>>, cell: &Cell) -> Result<()> {
    if cell.paragraphs.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("table:table-cell")))?;
        return Ok(());
    }

    let start =
        BytesStart::new("table:table-cell").with_attributes([("office:value-type", "string")]);
    writer.write_event(Event::Start(start))?;
    for paragraph in &cell.paragraphs {
        writer.write_event(Event::Start(BytesStart::new("text:p")))?;
        writer.write_event(Event::Text(BytesText::new(paragraph)))?;
        writer.write_event(Event::End(BytesEnd::new("text:p")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("table:table-cell")))?;
    Ok(())
}
