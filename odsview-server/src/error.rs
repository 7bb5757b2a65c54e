//! Errors of the conversion endpoint and their HTTP status codes

use actix_web::ResponseError;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use odsview_core::LoadError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServeError {
    /// Content type missing or not `multipart/form-data`
    #[error("Bad Request")]
    NotMultipart,

    #[error("No file uploaded")]
    MissingFile,

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Upload exceeds the limit of {limit} bytes")]
    TooLarge { limit: usize },

    /// Anything that goes wrong once the upload has been received
    #[error("Error processing file: {0}")]
    Processing(String),
}

impl ResponseError for ServeError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServeError::NotMultipart | ServeError::MissingFile | ServeError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ServeError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServeError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LoadError> for ServeError {
    fn from(err: LoadError) -> Self {
        ServeError::Processing(err.to_string())
    }
}

impl From<io::Error> for ServeError {
    fn from(err: io::Error) -> Self {
        ServeError::Processing(err.to_string())
    }
}

impl From<BlockingError> for ServeError {
    fn from(err: BlockingError) -> Self {
        ServeError::Processing(err.to_string())
    }
}
