use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of document classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bill,
    #[serde(rename = "ID Document")]
    IdDocument,
    Notes,
    Certificate,
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bill,
        Category::IdDocument,
        Category::Notes,
        Category::Certificate,
        Category::Uncategorized,
    ];

    /// Label as stored in the `documents.category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bill => "Bill",
            Category::IdDocument => "ID Document",
            Category::Notes => "Notes",
            Category::Certificate => "Certificate",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
