use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Why an upload produced no stored document.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid filename")]
    InvalidFilename,

    /// The multipart body could not be read (malformed or over the size limit).
    #[error("Malformed upload: {message}")]
    Malformed { status: StatusCode, message: String },

    #[error("Error processing file: {0}")]
    Processing(String),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::MissingFile | UploadError::InvalidFilename => StatusCode::BAD_REQUEST,
            UploadError::Malformed { status, .. } => *status,
            UploadError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for UploadError {
    fn from(e: PipelineError) -> Self {
        UploadError::Processing(e.to_string())
    }
}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::Processing(e.to_string())
    }
}

impl From<tokio::task::JoinError> for UploadError {
    fn from(e: tokio::task::JoinError) -> Self {
        UploadError::Processing(e.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for UploadError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        UploadError::Malformed {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            UploadError::Processing(cause) => tracing::error!(%cause, "Upload failed"),
            other => tracing::info!(reason = %other, "Upload rejected"),
        }
        (self.status(), self.to_string()).into_response()
    }
}
