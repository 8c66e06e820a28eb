pub mod image;
pub mod ocr;
pub mod pdf;
pub mod rasterize;

use std::path::Path;
use std::sync::Arc;

use crate::config::schema::OcrSettings;
use crate::error::ProcessError;

pub use ocr::{OcrEngine, TesseractCli};
pub use rasterize::{PageRasterizer, PdftoppmRasterizer};

/// Prefix of the text stored when a PDF cannot be opened or parsed.
pub const EXTRACTION_ERROR_MARKER: &str = "Error extracting PDF:";

/// Appended to the stored text when scanned pages could not be OCR'd.
pub const OCR_UNAVAILABLE_MARKER: &str = "OCR not available in this deployment.";

/// Kind of an uploaded file, decided by extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
}

impl DocumentKind {
    /// `.pdf` (any case) is a PDF; everything else is treated as an image.
    pub fn from_filename(filename: &str) -> Self {
        if filename.to_lowercase().ends_with(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Image
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(Self::from_filename)
            .unwrap_or(DocumentKind::Image)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Image => "image",
        }
    }
}

/// Outcome of running the extraction pipeline on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Text from the PDF text layer or from OCR.
    Text(String),
    /// The PDF could not be opened or parsed.
    Failed { cause: String },
    /// OCR was needed but could not run; `partial` is whatever was gathered.
    OcrUnavailable { partial: String },
}

impl Extraction {
    /// The text persisted as `extracted_text`. Degraded outcomes still
    /// produce a human-readable payload so every row has something to show.
    pub fn stored_text(&self) -> String {
        match self {
            Extraction::Text(text) => text.clone(),
            Extraction::Failed { cause } => format!("{} {}", EXTRACTION_ERROR_MARKER, cause),
            Extraction::OcrUnavailable { partial } => format!("{}\n{}", partial, OCR_UNAVAILABLE_MARKER)
                .trim()
                .to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, Extraction::Text(_))
    }

    /// Short label for span fields and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            Extraction::Text(_) => "text",
            Extraction::Failed { .. } => "failed",
            Extraction::OcrUnavailable { .. } => "ocr_unavailable",
        }
    }
}

pub trait DocumentProcessor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<Extraction, ProcessError>;
}

/// One processor per `DocumentKind`.
pub struct ProcessorRegistry {
    pdf: pdf::PdfProcessor,
    image: image::ImageProcessor,
}

impl ProcessorRegistry {
    pub fn new(ocr: Arc<dyn OcrEngine>, rasterizer: Arc<dyn PageRasterizer>) -> Self {
        Self {
            pdf: pdf::PdfProcessor::new(ocr.clone(), rasterizer),
            image: image::ImageProcessor::new(ocr),
        }
    }

    /// Builds the production registry: `tesseract` (or libtesseract with the
    /// `leptess` feature) plus `pdftoppm`.
    pub fn from_settings(settings: &OcrSettings) -> Self {
        let rasterizer = Arc::new(PdftoppmRasterizer::new(&settings.pdftoppm_cmd, settings.dpi));
        Self::new(ocr::default_engine(settings), rasterizer)
    }

    pub fn extract(&self, path: &Path, kind: DocumentKind) -> Result<Extraction, ProcessError> {
        let processor: &dyn DocumentProcessor = match kind {
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Image => &self.image,
        };
        processor.extract(path)
    }
}
