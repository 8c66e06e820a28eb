pub mod categorizer;
pub mod config;
pub mod db;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod processor;
pub mod sanitize;
pub mod server;

pub use categorizer::{Categorizer, Category};
pub use config::{load_settings, Settings};
pub use db::Database;
pub use error::{ConfigError, DocsiftError, ProcessError, Result};
pub use normalize::{normalize, Normalizer, StopWords};
pub use pipeline::{IngestOutcome, Pipeline, PipelineError};
pub use processor::{Extraction, ProcessorRegistry};
