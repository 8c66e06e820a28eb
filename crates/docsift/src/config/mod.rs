pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, load_config, load_config_from_str, load_settings, load_stopwords,
    validate_settings,
};
pub use schema::{KeywordRuleConfig, LogFormat, OcrSettings, Settings};
