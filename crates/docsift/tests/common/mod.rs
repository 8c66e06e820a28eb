//! Shared test utilities for docsift integration tests.
//!
//! This module provides:
//! - `TestHarness`, an in-process server over a temp upload dir and an
//!   in-memory database, with fake OCR and rasterizer backends
//! - Builders for PDFs, images and multipart request bodies

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
