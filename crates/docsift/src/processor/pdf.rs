use std::path::Path;
use std::sync::Arc;

use crate::error::ProcessError;
use crate::processor::ocr::OcrEngine;
use crate::processor::rasterize::PageRasterizer;
use crate::processor::{DocumentProcessor, Extraction};
use crate::sanitize;

pub struct PdfProcessor {
    ocr: Arc<dyn OcrEngine>,
    rasterizer: Arc<dyn PageRasterizer>,
}

impl PdfProcessor {
    pub fn new(ocr: Arc<dyn OcrEngine>, rasterizer: Arc<dyn PageRasterizer>) -> Self {
        Self { ocr, rasterizer }
    }
}

impl DocumentProcessor for PdfProcessor {
    fn extract(&self, path: &Path) -> Result<Extraction, ProcessError> {
        let _span = tracing::info_span!("processor.pdf", file = %sanitize::redact_path(path))
            .entered();

        let doc = match lopdf::Document::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    "Failed to parse PDF {}: {}",
                    sanitize::redact_path(path),
                    e
                );
                return Ok(Extraction::Failed {
                    cause: e.to_string(),
                });
            }
        };

        let mut text = extract_text_layer(&doc);
        if !text.trim().is_empty() {
            return Ok(Extraction::Text(text.trim().to_string()));
        }

        // No text layer: the document is a scan.
        let page_count = doc.get_pages().len() as u32;
        let _ocr_span = tracing::info_span!(
            "processor.ocr_fallback",
            pages = page_count,
            engine = self.ocr.name(),
            rasterizer = self.rasterizer.name(),
        )
        .entered();

        match self.ocr_pages(path, page_count, &mut text) {
            Ok(()) => Ok(Extraction::Text(text.trim().to_string())),
            Err(e) => {
                tracing::warn!("OCR fallback unavailable: {}", e);
                Ok(Extraction::OcrUnavailable {
                    partial: text.trim().to_string(),
                })
            }
        }
    }
}

impl PdfProcessor {
    /// Rasterizes and OCRs pages in order, appending to `text`. Stops at the
    /// first failure, leaving the pages recognized so far in `text`.
    fn ocr_pages(
        &self,
        path: &Path,
        page_count: u32,
        text: &mut String,
    ) -> Result<(), ProcessError> {
        for page_num in 1..=page_count {
            let image = self.rasterizer.render_page(path, page_num)?;
            let page_text = self.ocr.recognize(&image)?;
            tracing::debug!(page = page_num, chars = page_text.len(), "OCR page done");
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(())
    }
}

/// Concatenates the text layer of every page, one newline after each page
/// that produced text. Pages that fail to decode are skipped.
fn extract_text_layer(doc: &lopdf::Document) -> String {
    let mut text = String::new();

    for (page_num, _) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) if !page_text.is_empty() => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(page = page_num, "No text layer: {}", e),
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::test_support::*;
    use std::sync::atomic::Ordering;
    use tempfile::NamedTempFile;

    fn write_pdf(pages: &[Option<&str>]) -> NamedTempFile {
        let file = NamedTempFile::with_suffix(".pdf").unwrap();
        std::fs::write(file.path(), build_pdf(pages)).unwrap();
        file
    }


    #[test]
    fn test_text_layer_skips_rasterization() {
        let rasterizer = Arc::new(LabelRasterizer::default());
        let processor = PdfProcessor::new(Arc::new(EchoOcr), rasterizer.clone());
        let file = write_pdf(&[Some("Tax Invoice"), Some("Grand Total")]);

        let result = processor.extract(file.path()).unwrap();

        match result {
            Extraction::Text(text) => {
                assert!(text.contains("Tax Invoice"));
                assert!(text.contains("Grand Total"));
                assert!(text.find("Tax Invoice") < text.find("Grand Total"));
                assert_eq!(text, text.trim());
            }
            other => panic!("Expected text, got {:?}", other),
        }
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scanned_pdf_uses_ocr_in_page_order() {
        let rasterizer = Arc::new(LabelRasterizer::default());
        let processor = PdfProcessor::new(Arc::new(EchoOcr), rasterizer.clone());
        let file = write_pdf(&[None, None, None]);

        let result = processor.extract(file.path()).unwrap();

        assert_eq!(
            result,
            Extraction::Text("scanned page 1\nscanned page 2\nscanned page 3".to_string())
        );
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_missing_ocr_engine_degrades() {
        let processor = PdfProcessor::new(Arc::new(MissingOcr), Arc::new(LabelRasterizer::default()));
        let file = write_pdf(&[None]);

        let result = processor.extract(file.path()).unwrap();

        assert_eq!(
            result,
            Extraction::OcrUnavailable {
                partial: String::new()
            }
        );
        assert!(result
            .stored_text()
            .contains(crate::processor::OCR_UNAVAILABLE_MARKER));
    }

    #[test]
    fn test_rasterizer_failure_keeps_earlier_pages() {
        let rasterizer = Arc::new(LabelRasterizer {
            fail_on: Some(2),
            ..Default::default()
        });
        let processor = PdfProcessor::new(Arc::new(EchoOcr), rasterizer);
        let file = write_pdf(&[None, None, None]);

        let result = processor.extract(file.path()).unwrap();

        assert_eq!(
            result,
            Extraction::OcrUnavailable {
                partial: "scanned page 1".to_string()
            }
        );
    }

    #[test]
    fn test_corrupted_pdf_is_failed_extraction() {
        let file = NamedTempFile::with_suffix(".pdf").unwrap();
        std::fs::write(file.path(), b"not a valid pdf content").unwrap();

        let processor = PdfProcessor::new(Arc::new(EchoOcr), Arc::new(LabelRasterizer::default()));
        let result = processor.extract(file.path()).unwrap();

        match &result {
            Extraction::Failed { cause } => assert!(!cause.is_empty()),
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert!(result
            .stored_text()
            .starts_with(crate::processor::EXTRACTION_ERROR_MARKER));
    }

    #[test]
    fn test_missing_file_is_failed_extraction() {
        let processor = PdfProcessor::new(Arc::new(EchoOcr), Arc::new(LabelRasterizer::default()));
        let result = processor.extract(Path::new("/nonexistent/file.pdf")).unwrap();
        assert!(matches!(result, Extraction::Failed { .. }));
    }

    #[test]
    fn test_extract_text_layer_empty_pages() {
        let doc = lopdf::Document::load_mem(&build_pdf(&[None, None])).unwrap();
        assert!(extract_text_layer(&doc).trim().is_empty());
    }
}
