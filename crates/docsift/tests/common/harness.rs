//! In-process test server.
//!
//! `TestHarness` wires the real router, pipeline and schema to a temporary
//! upload directory and an in-memory database. OCR and rasterization are
//! faked so tests never need tesseract or poppler installed.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use docsift::categorizer::Categorizer;
use docsift::db::{document_repo, Database};
use docsift::error::ProcessError;
use docsift::normalize::Normalizer;
use docsift::pipeline::Pipeline;
use docsift::processor::{OcrEngine, PageRasterizer, ProcessorRegistry};
use docsift::server::{self, AppState};

use super::builders::MultipartBuilder;

const PNG_MAGIC: &[u8] = b"\x89PNG";

/// Returns `image_text` for real images and echoes rasterizer output
/// (plain UTF-8 from [`FakeRasterizer`]) otherwise.
pub struct FakeOcr {
    image_text: String,
}

impl OcrEngine for FakeOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, ProcessError> {
        if image.starts_with(PNG_MAGIC) {
            Ok(self.image_text.clone())
        } else {
            Ok(String::from_utf8_lossy(image).into_owned())
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// An OCR backend that is not installed.
pub struct UnavailableOcr;

impl OcrEngine for UnavailableOcr {
    fn recognize(&self, _image: &[u8]) -> Result<String, ProcessError> {
        Err(ProcessError::OcrFailed("tesseract is not installed".to_string()))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// "Renders" page N as the bytes of `scanned page N`.
pub struct FakeRasterizer;

impl PageRasterizer for FakeRasterizer {
    fn render_page(&self, _pdf: &std::path::Path, page: u32) -> Result<Vec<u8>, ProcessError> {
        Ok(format!("scanned page {}", page).into_bytes())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub struct TestHarness {
    temp_dir: TempDir,
    pub upload_dir: PathBuf,
    pub db: Database,
    app: Router,
}

impl TestHarness {
    /// Harness whose OCR reads every image as `image_text`.
    pub fn new(image_text: &str) -> Self {
        Self::with_ocr(Arc::new(FakeOcr {
            image_text: image_text.to_string(),
        }))
    }

    /// Harness without a working OCR backend.
    pub fn without_ocr() -> Self {
        Self::with_ocr(Arc::new(UnavailableOcr))
    }

    pub fn with_ocr(ocr: Arc<dyn OcrEngine>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let upload_dir = temp_dir.path().join("uploads");
        std::fs::create_dir_all(&upload_dir).expect("Failed to create upload directory");

        let db = Database::open_in_memory().expect("Failed to open test database");
        let pipeline = Pipeline::new(
            ProcessorRegistry::new(ocr, Arc::new(FakeRasterizer)),
            Normalizer::default(),
            Categorizer::default(),
            db.clone(),
        );
        let app = server::router(AppState::new(pipeline, &upload_dir, 1024 * 1024));

        Self {
            temp_dir,
            upload_dir,
            db,
            app,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router returned an error");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(
            Request::get(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn post_multipart(&self, body: MultipartBuilder) -> (StatusCode, String) {
        self.send(
            Request::post("/upload")
                .header(header::CONTENT_TYPE, MultipartBuilder::content_type())
                .body(Body::from(body.build()))
                .expect("Failed to build request"),
        )
        .await
    }

    /// Uploads `content` as the `file` field under `filename`.
    pub async fn upload(&self, filename: &str, content: &[u8]) -> (StatusCode, String) {
        self.post_multipart(MultipartBuilder::new().file("file", filename, content))
            .await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_str(&body).expect("Response is not JSON");
        (status, json)
    }

    pub fn document_count(&self) -> u64 {
        document_repo::count(&self.db).expect("Failed to count documents")
    }

    pub fn temp_path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}
