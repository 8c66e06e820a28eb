use std::path::Path;

use tracing::{debug, info, info_span, warn};

use crate::categorizer::{Categorizer, Category};
use crate::config::{load_stopwords, Settings};
use crate::db::{document_repo, Database, NewDocument};
use crate::normalize::Normalizer;
use crate::processor::{DocumentKind, Extraction, ProcessorRegistry};
use crate::sanitize;

use super::error::PipelineError;

/// Everything known about a document once it has been stored.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub id: i64,
    pub filename: String,
    /// Raw text as persisted, including any degradation marker.
    pub extracted_text: String,
    pub category: Category,
    pub extraction: Extraction,
}

/// Runs one upload through extract, normalize, categorize and persist.
pub struct Pipeline {
    processor: ProcessorRegistry,
    normalizer: Normalizer,
    categorizer: Categorizer,
    db: Database,
}

impl Pipeline {
    pub fn new(
        processor: ProcessorRegistry,
        normalizer: Normalizer,
        categorizer: Categorizer,
        db: Database,
    ) -> Self {
        Self {
            processor,
            normalizer,
            categorizer,
            db,
        }
    }

    /// Opens the configured database and builds the production pipeline.
    pub fn open(settings: &Settings) -> crate::Result<Self> {
        let db = Database::open(Path::new(&settings.database_path))?;
        Self::from_settings(settings, db)
    }

    /// Production constructor: external OCR tools, configured stopwords and rules.
    pub fn from_settings(settings: &Settings, db: Database) -> crate::Result<Self> {
        let stopwords = load_stopwords(settings)?;
        Ok(Self::new(
            ProcessorRegistry::from_settings(&settings.ocr),
            Normalizer::new(stopwords.into()),
            settings.categorizer(),
            db,
        ))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Ingests the file at `path`, recording it under `filename`.
    ///
    /// The document kind is decided by `filename`'s extension.
    pub fn run(&self, path: &Path, filename: &str) -> Result<IngestOutcome, PipelineError> {
        let _span = info_span!("ingest", file = %sanitize::redact_path(path)).entered();

        let extraction = {
            let kind = DocumentKind::from_filename(filename);
            let _step = info_span!("extract", kind = kind.as_str()).entered();
            let extraction = self.processor.extract(path, kind)?;
            if extraction.is_degraded() {
                warn!(outcome = extraction.outcome(), "Extraction degraded");
            }
            extraction
        };
        let extracted_text = extraction.stored_text();

        let normalized = {
            let _step = info_span!("normalize").entered();
            self.normalizer.normalize(&extracted_text)
        };

        let category = {
            let _step = info_span!("categorize").entered();
            let result = self.categorizer.categorize_detailed(&normalized);
            debug!(
                category = %result.category,
                keyword = result.matched_keyword.as_deref().unwrap_or("-"),
                "Categorized document"
            );
            result.category
        };

        let id = {
            let _step = info_span!("persist").entered();
            document_repo::insert(
                &self.db,
                &NewDocument {
                    filename: filename.to_string(),
                    extracted_text: extracted_text.clone(),
                    category,
                },
            )?
        };

        info!(id, category = %category, outcome = extraction.outcome(), "Document ingested");

        Ok(IngestOutcome {
            id,
            filename: filename.to_string(),
            extracted_text,
            category,
            extraction,
        })
    }
}
