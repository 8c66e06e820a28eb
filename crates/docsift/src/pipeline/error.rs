use thiserror::Error;

/// Failures that abort an ingest before anything is persisted.
///
/// Unreadable PDFs and missing OCR are not errors here; they come back as
/// degraded [`crate::processor::Extraction`] values and are stored.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Document processing failed: {0}")]
    Processing(#[from] crate::error::ProcessError),

    #[error("Storage failed: {0}")]
    Database(#[from] crate::db::DatabaseError),
}
