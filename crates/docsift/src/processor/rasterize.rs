use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ProcessError;

/// Renders single PDF pages to PNG images.
pub trait PageRasterizer: Send + Sync {
    /// Renders 1-based `page` of the PDF at `pdf` as PNG bytes.
    fn render_page(&self, pdf: &Path, page: u32) -> Result<Vec<u8>, ProcessError>;

    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }
}

/// Rasterizes through poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    command: String,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(command: &str, dpi: u32) -> Self {
        Self {
            command: command.to_string(),
            dpi,
        }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn render_page(&self, pdf: &Path, page: u32) -> Result<Vec<u8>, ProcessError> {
        let output_prefix =
            std::env::temp_dir().join(format!("docsift_page_{}", uuid::Uuid::new_v4()));
        let page_arg = page.to_string();

        let output = Command::new(&self.command)
            .args(["-png", "-r", &self.dpi.to_string(), "-f", &page_arg, "-l", &page_arg])
            .arg(pdf)
            .arg(&output_prefix)
            .output()
            .map_err(|e| {
                ProcessError::Rasterize(format!(
                    "Failed to run {}: {}. Make sure poppler-utils is installed.",
                    self.command, e
                ))
            })?;

        if !output.status.success() {
            return Err(ProcessError::Rasterize(format!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let image_path = rendered_page_path(&output_prefix, page).ok_or_else(|| {
            ProcessError::Rasterize("Failed to find rendered page image".to_string())
        })?;

        let image_data = std::fs::read(&image_path).map_err(|e| {
            ProcessError::Rasterize(format!("Failed to read rendered image: {}", e))
        })?;

        let _ = std::fs::remove_file(&image_path);

        Ok(image_data)
    }

    fn name(&self) -> &'static str {
        "pdftoppm"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.command).arg("-v").output().is_ok()
    }
}

/// pdftoppm zero-pads the page suffix to the width of the document's page
/// count, so the rendered name is one of `prefix-7.png`, `prefix-07.png`, ...
fn rendered_page_path(prefix: &Path, page: u32) -> Option<PathBuf> {
    let prefix = prefix.display();
    [
        format!("{}-{}.png", prefix, page),
        format!("{}-{:02}.png", prefix, page),
        format!("{}-{:03}.png", prefix, page),
        format!("{}-{:04}.png", prefix, page),
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
}
