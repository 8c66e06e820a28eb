use serde::{Deserialize, Serialize};

use crate::categorizer::{Categorizer, Category, KeywordRule};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Where uploaded files are written. Created at startup.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub ocr: OcrSettings,
    /// Optional word list replacing the built-in English stopwords.
    #[serde(default)]
    pub stopwords_path: Option<String>,
    /// Optional replacement for the built-in keyword rule table.
    #[serde(default)]
    pub rules: Option<Vec<KeywordRuleConfig>>,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_database_path() -> String {
    "documents.db".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: default_upload_dir(),
            database_path: default_database_path(),
            max_upload_bytes: default_max_upload_bytes(),
            ocr: OcrSettings::default(),
            stopwords_path: None,
            rules: None,
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Categorizer for the configured rules, or the built-in table.
    pub fn categorizer(&self) -> Categorizer {
        match &self.rules {
            Some(rules) => Categorizer::new(rules.iter().map(KeywordRuleConfig::to_rule).collect()),
            None => Categorizer::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,
    #[serde(default = "default_pdftoppm_cmd")]
    pub pdftoppm_cmd: String,
}

fn default_languages() -> Vec<String> {
    vec!["eng".to_string()]
}

fn default_dpi() -> u32 {
    300
}

fn default_tesseract_cmd() -> String {
    "tesseract".to_string()
}

fn default_pdftoppm_cmd() -> String {
    "pdftoppm".to_string()
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            dpi: default_dpi(),
            tesseract_cmd: default_tesseract_cmd(),
            pdftoppm_cmd: default_pdftoppm_cmd(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRuleConfig {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl KeywordRuleConfig {
    pub fn to_rule(&self) -> KeywordRule {
        KeywordRule::new(self.category, self.keywords.iter().cloned())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
