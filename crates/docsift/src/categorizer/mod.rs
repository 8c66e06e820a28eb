pub mod category;
pub mod matcher;

pub use category::{Category, ParseCategoryError};
pub use matcher::{CategorizationResult, Categorizer, KeywordRule};
