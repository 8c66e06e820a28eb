use super::Category;

/// One entry of the ordered rule table: if any keyword occurs in the text,
/// the document gets `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// First keyword contained in `text`. Plain substring containment, so
    /// "total" also matches inside "subtotal".
    fn first_match(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| text.contains(k.as_str()))
            .map(String::as_str)
    }
}

pub struct Categorizer {
    rules: Vec<KeywordRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizationResult {
    pub category: Category,
    pub matched_keyword: Option<String>,
}

impl Categorizer {
    /// Rules are evaluated in the given order; the first hit wins.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// The built-in rule table.
    pub fn builtin_rules() -> Vec<KeywordRule> {
        vec![
            KeywordRule::new(Category::Bill, ["invoice", "gst", "amount", "total"]),
            KeywordRule::new(Category::IdDocument, ["prn", "roll", "student", "id"]),
            KeywordRule::new(
                Category::Notes,
                ["assignment", "lecture", "subject", "class"],
            ),
            KeywordRule::new(Category::Certificate, ["certificate", "award", "completion"]),
        ]
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn categorize(&self, text: &str) -> Category {
        self.categorize_detailed(text).category
    }

    pub fn categorize_detailed(&self, text: &str) -> CategorizationResult {
        for rule in &self.rules {
            if let Some(keyword) = rule.first_match(text) {
                return CategorizationResult {
                    category: rule.category,
                    matched_keyword: Some(keyword.to_string()),
                };
            }
        }

        CategorizationResult {
            category: Category::Uncategorized,
            matched_keyword: None,
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(Self::builtin_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_builtin_rule() {
        let categorizer = Categorizer::default();
        assert_eq!(categorizer.categorize("gst invoice"), Category::Bill);
        assert_eq!(categorizer.categorize("student prn"), Category::IdDocument);
        assert_eq!(categorizer.categorize("lecture notes"), Category::Notes);
        assert_eq!(
            categorizer.categorize("certificate completion"),
            Category::Certificate
        );
    }

    #[test]
    fn test_empty_text_is_uncategorized() {
        let result = Categorizer::default().categorize_detailed("");
        assert_eq!(result.category, Category::Uncategorized);
        assert_eq!(result.matched_keyword, None);
    }

    #[test]
    fn test_priority_bill_beats_certificate() {
        let categorizer = Categorizer::default();
        assert_eq!(
            categorizer.categorize("certificate for invoice"),
            Category::Bill
        );
    }

    #[test]
    fn test_priority_bill_beats_id_document() {
        let result = Categorizer::default().categorize_detailed("student roll amount due");
        assert_eq!(result.category, Category::Bill);
        assert_eq!(result.matched_keyword.as_deref(), Some("amount"));
    }

    #[test]
    fn test_substring_semantics() {
        let categorizer = Categorizer::default();
        // "id" hides inside "provided"; "class" inside "classic".
        assert_eq!(
            categorizer.categorize("provided materials"),
            Category::IdDocument
        );
        assert_eq!(categorizer.categorize("classic novel"), Category::Notes);
        assert_eq!(categorizer.categorize("subtotal"), Category::Bill);
    }

    #[test]
    fn test_reports_first_keyword_in_rule_order() {
        let result = Categorizer::default().categorize_detailed("total invoice");
        // Keywords are checked in declaration order, not text order.
        assert_eq!(result.matched_keyword.as_deref(), Some("invoice"));
    }

    #[test]
    fn test_custom_rules_order() {
        let categorizer = Categorizer::new(vec![
            KeywordRule::new(Category::Certificate, ["Award"]),
            KeywordRule::new(Category::Bill, ["award"]),
        ]);
        assert_eq!(categorizer.categorize("award"), Category::Certificate);
        assert_eq!(categorizer.rules()[0].keywords, vec!["award".to_string()]);
    }

    #[test]
    fn test_no_rules_everything_uncategorized() {
        let categorizer = Categorizer::new(vec![]);
        assert_eq!(categorizer.categorize("invoice"), Category::Uncategorized);
    }
}
