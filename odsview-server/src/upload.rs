//! Multipart upload handling and temporary file staging

use actix_multipart::Multipart;
use futures_util::StreamExt;
use odsview_core::{EmptySheetPolicy, SheetTable, extract, load_document};
use std::io::Write;
use std::path::Path;

use crate::error::ServeError;

/// Form field carrying the spreadsheet
pub const FILE_FIELD: &str = "file";

/// Read the `file` field of a multipart body into memory.
///
/// Other fields are drained and ignored. The first `file` field wins.
pub async fn read_file_field(
    mut multipart: Multipart,
    limit: usize,
) -> Result<Vec<u8>, ServeError> {
    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(|e| ServeError::Multipart(e.to_string()))?;
        let is_file = field.name() == Some(FILE_FIELD);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ServeError::Multipart(e.to_string()))?;
            if !is_file {
                continue;
            }
            if bytes.len() + chunk.len() > limit {
                return Err(ServeError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        if is_file {
            return Ok(bytes);
        }
    }

    Err(ServeError::MissingFile)
}

/// Stage `bytes` in a fresh `.ods` temp file, load it and extract its tables.
///
/// The temp file is removed before returning, whether or not loading succeeded.
pub fn convert_upload(
    bytes: &[u8],
    temp_dir: Option<&Path>,
    policy: EmptySheetPolicy,
) -> Result<Vec<SheetTable>, ServeError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("odsview-upload-").suffix(".ods");
    let mut staged = match temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    staged.write_all(bytes)?;
    staged.flush()?;

    // On error `staged` is dropped here, which deletes the file
    let document = load_document(staged.path())?;
    let tables = extract(&document, policy);

    if let Err(e) = staged.close() {
        log::warn!("Failed to remove staged upload: {}", e);
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use odsview_core::sample::sample_document;
    use odsview_core::writer::write_document;
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn test_convert_upload_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = write_document(&sample_document(), Cursor::new(Vec::new()))
            .unwrap()
            .into_inner();

        let tables = convert_upload(&bytes, Some(dir.path()), EmptySheetPolicy::Omit).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        let err = convert_upload(b"garbage", Some(dir.path()), EmptySheetPolicy::Omit).unwrap_err();
        assert!(matches!(err, ServeError::Processing(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
