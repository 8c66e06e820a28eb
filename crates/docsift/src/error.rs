use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid environment variable {name}='{value}': {reason}")]
    InvalidEnv {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Invalid rule for category '{category}': {reason}")]
    InvalidRule { category: String, reason: String },

    #[error("Failed to read stopword list '{path}': {source}")]
    ReadStopwords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create upload directory '{path}': {source}")]
    CreateUploadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to read document '{path}': {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process image: {0}")]
    ImageProcessing(String),

    #[error("Failed to rasterize PDF: {0}")]
    Rasterize(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),
}

pub type Result<T> = std::result::Result<T, DocsiftError>;
