use std::process::Command;
use std::sync::Arc;

use crate::config::schema::OcrSettings;
use crate::error::ProcessError;

/// Turns a PNG image into text.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image_png: &[u8]) -> Result<String, ProcessError>;

    fn name(&self) -> &'static str;

    /// Cheap probe used at startup to warn about a missing backend.
    fn is_available(&self) -> bool {
        true
    }
}

/// Joins configured languages the way tesseract expects (`eng+deu`).
pub fn language_string(languages: &[String]) -> String {
    if languages.is_empty() {
        "eng".to_string()
    } else {
        languages.join("+")
    }
}

/// The engine used in production for the given settings.
pub fn default_engine(settings: &OcrSettings) -> Arc<dyn OcrEngine> {
    #[cfg(feature = "leptess")]
    {
        Arc::new(LeptessEngine::new(&settings.languages, settings.dpi))
    }

    #[cfg(not(feature = "leptess"))]
    {
        Arc::new(TesseractCli::new(
            &settings.tesseract_cmd,
            &settings.languages,
            settings.dpi,
        ))
    }
}

/// Runs the `tesseract` binary on a temporary PNG.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    languages: String,
    dpi: u32,
}

impl TesseractCli {
    pub fn new(command: &str, languages: &[String], dpi: u32) -> Self {
        Self {
            command: command.to_string(),
            languages: language_string(languages),
            dpi,
        }
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image_png: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("processor.ocr", engine = "tesseract").entered();

        let image_path =
            std::env::temp_dir().join(format!("docsift_ocr_{}.png", uuid::Uuid::new_v4()));
        std::fs::write(&image_path, image_png)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to write temp image: {}", e)))?;

        let output = Command::new(&self.command)
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", &self.languages, "--dpi", &self.dpi.to_string()])
            .output();

        let _ = std::fs::remove_file(&image_path);

        let output = output.map_err(|e| {
            ProcessError::OcrFailed(format!(
                "Failed to run {}: {}. Make sure tesseract-ocr is installed.",
                self.command, e
            ))
        })?;

        if !output.status.success() {
            return Err(ProcessError::OcrFailed(format!(
                "tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.command).arg("--version").output().is_ok()
    }
}

/// In-process tesseract through libtesseract bindings.
#[cfg(feature = "leptess")]
#[derive(Debug, Clone)]
pub struct LeptessEngine {
    languages: String,
    dpi: u32,
}

#[cfg(feature = "leptess")]
impl LeptessEngine {
    pub fn new(languages: &[String], dpi: u32) -> Self {
        Self {
            languages: language_string(languages),
            dpi,
        }
    }
}

#[cfg(feature = "leptess")]
impl OcrEngine for LeptessEngine {
    fn recognize(&self, image_png: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("processor.ocr", engine = "leptess").entered();

        let mut lt = leptess::LepTess::new(None, &self.languages).map_err(|e| {
            ProcessError::OcrFailed(format!("Failed to initialize Tesseract: {}", e))
        })?;

        lt.set_image_from_mem(image_png)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to set image for OCR: {}", e)))?;
        lt.set_source_resolution(self.dpi as i32);

        lt.get_utf8_text()
            .map_err(|e| ProcessError::OcrFailed(format!("OCR failed: {}", e)))
    }

    fn name(&self) -> &'static str {
        "leptess"
    }

    fn is_available(&self) -> bool {
        leptess::LepTess::new(None, &self.languages).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_string() {
        assert_eq!(
            language_string(&["eng".to_string(), "deu".to_string()]),
            "eng+deu"
        );
        assert_eq!(language_string(&["fra".to_string()]), "fra");
        assert_eq!(language_string(&[]), "eng");
    }

    #[test]
    fn test_cli_settings() {
        let cli = TesseractCli::new("tesseract", &["eng".to_string()], 150);
        assert_eq!(cli.languages(), "eng");
        assert_eq!(cli.dpi(), 150);
        assert_eq!(cli.name(), "tesseract");
    }

    #[test]
    fn test_missing_binary_is_ocr_failure() {
        let cli = TesseractCli::new("/nonexistent/bin/tesseract", &[], 300);
        assert!(!cli.is_available());

        match cli.recognize(b"\x89PNG") {
            Err(ProcessError::OcrFailed(msg)) => {
                assert!(msg.contains("Failed to run"), "unexpected message: {}", msg);
            }
            other => panic!("Expected OcrFailed error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_engine_uses_settings() {
        let engine = default_engine(&OcrSettings::default());
        assert!(!engine.name().is_empty());
    }
}
