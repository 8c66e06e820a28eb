use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use crate::error::ProcessError;
use crate::processor::ocr::OcrEngine;
use crate::processor::{DocumentProcessor, Extraction};
use crate::sanitize;

pub struct ImageProcessor {
    ocr: Arc<dyn OcrEngine>,
}

impl ImageProcessor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }
}

impl DocumentProcessor for ImageProcessor {
    fn extract(&self, path: &Path) -> Result<Extraction, ProcessError> {
        let _span = tracing::info_span!("processor.image", file = %sanitize::redact_path(path))
            .entered();

        let image_data = std::fs::read(path).map_err(|e| ProcessError::ReadDocument {
            path: path.to_path_buf(),
            source: e,
        })?;

        // An image we cannot decode simply has no text.
        let png = match to_png(&image_data) {
            Ok(png) => png,
            Err(e) => {
                tracing::warn!("Unreadable image {}: {}", sanitize::redact_path(path), e);
                return Ok(Extraction::Text(String::new()));
            }
        };

        match self.ocr.recognize(&png) {
            Ok(text) => Ok(Extraction::Text(text.trim().to_string())),
            Err(e) => {
                tracing::warn!("OCR unavailable for image: {}", e);
                Ok(Extraction::OcrUnavailable {
                    partial: String::new(),
                })
            }
        }
    }
}

/// Decodes any supported image format and re-encodes it as PNG, which every
/// OCR backend accepts.
fn to_png(image_data: &[u8]) -> Result<Vec<u8>, ProcessError> {
    let img = image::load_from_memory(image_data)
        .map_err(|e| ProcessError::ImageProcessing(format!("Failed to load image: {}", e)))?;

    let mut png_data = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)
        .map_err(|e| ProcessError::ImageProcessing(format!("Failed to convert image: {}", e)))?;

    Ok(png_data)
}
