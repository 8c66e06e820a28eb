use std::path::Path;

use crate::categorizer::Category;
use crate::config::schema::Settings;
use crate::error::ConfigError;
use crate::normalize::{normalize, StopWords};

/// Environment variables that override file settings.
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_UPLOAD_FOLDER: &str = "UPLOAD_FOLDER";
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = serde_json::from_str(content)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Loads settings from an optional file, then applies process environment
/// overrides and validates the result.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => load_config(path)?,
        None => Settings::default(),
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok())?;
    validate_settings(&settings)?;

    Ok(settings)
}

/// Applies `PORT`, `HOST`, `UPLOAD_FOLDER` and `DATABASE_PATH` from `lookup`.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT) {
        settings.port = port.trim().parse().map_err(|e| ConfigError::InvalidEnv {
            name: ENV_PORT.to_string(),
            value: port.clone(),
            reason: format!("{}", e),
        })?;
    }
    if let Some(host) = lookup(ENV_HOST) {
        settings.host = host;
    }
    if let Some(dir) = lookup(ENV_UPLOAD_FOLDER) {
        settings.upload_dir = dir;
    }
    if let Some(path) = lookup(ENV_DATABASE_PATH) {
        settings.database_path = path;
    }

    Ok(())
}

/// Stopword list from `stopwords_path`, or the built-in English list.
pub fn load_stopwords(settings: &Settings) -> Result<StopWords, ConfigError> {
    match &settings.stopwords_path {
        Some(path) => StopWords::from_file(path),
        None => Ok(StopWords::english()),
    }
}

pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.port == 0 {
        return Err(ConfigError::Validation {
            message: "port must be non-zero".to_string(),
        });
    }

    if settings.upload_dir.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "upload_dir must not be empty".to_string(),
        });
    }

    if settings.ocr.languages.is_empty() {
        return Err(ConfigError::Validation {
            message: "ocr.languages must contain at least one language".to_string(),
        });
    }
    if settings.ocr.languages.iter().any(|l| l.trim().is_empty()) {
        return Err(ConfigError::Validation {
            message: "ocr.languages must not contain blank entries".to_string(),
        });
    }

    if !(72..=1200).contains(&settings.ocr.dpi) {
        return Err(ConfigError::Validation {
            message: format!("ocr.dpi must be between 72 and 1200, got {}", settings.ocr.dpi),
        });
    }

    if let Some(rules) = &settings.rules {
        for rule in rules {
            if rule.category == Category::Uncategorized {
                return Err(ConfigError::InvalidRule {
                    category: rule.category.to_string(),
                    reason: "Uncategorized is the fallback and cannot be a rule target"
                        .to_string(),
                });
            }
            if rule.keywords.is_empty() {
                return Err(ConfigError::InvalidRule {
                    category: rule.category.to_string(),
                    reason: "rule has no keywords".to_string(),
                });
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::InvalidRule {
                    category: rule.category.to_string(),
                    reason: "empty keyword would match every document".to_string(),
                });
            }
            if let Some(keyword) = rule.keywords.iter().find(|k| !survives_normalization(k)) {
                return Err(ConfigError::InvalidRule {
                    category: rule.category.to_string(),
                    reason: format!(
                        "keyword '{}' contains digits, punctuation or repeated spaces \
                         that normalization removes, so it can never match",
                        keyword
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Keywords are matched against normalized text, so a keyword that
/// normalization would alter can never be found.
fn survives_normalization(keyword: &str) -> bool {
    let no_stopwords = StopWords::from_words(Vec::<&str>::new());
    normalize(keyword, &no_stopwords) == keyword.trim().to_lowercase()
}
