//! Filter criteria for ledger queries
//!
//! A pure query descriptor with no ownership semantics: build one with the
//! chained setters, hand it to the engine, and it matches records by value.

use serde::{Deserialize, Serialize};

use crate::models::{DateRange, TransactionRecord};

/// Criteria for narrowing a set of ledger records
///
/// All fields are optional; an empty criteria matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive date range, open bounds match all dates
    pub date_range: DateRange,
    /// Match any of these categories (empty = no category filter)
    pub categories: Vec<String>,
    /// Match records carrying any of these tags (empty = no tag filter)
    pub tags: Vec<String>,
    /// Inclusive lower amount bound
    pub min_amount: Option<f64>,
    /// Inclusive upper amount bound
    pub max_amount: Option<f64>,
    /// Case-insensitive substring search over category/source, note, and tags
    pub search_text: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date range filter
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Restrict to a set of categories
    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Restrict to a single category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories = vec![category.into()];
        self
    }

    /// Restrict to records carrying any of these tags
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the inclusive amount bounds
    pub fn amount_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Set the free-text search
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Whether a record satisfies every criterion
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        if !self.date_range.contains(&record.date) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }

        if let Some(min) = self.min_amount {
            if record.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if record.amount > max {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let tag_match = self
                .tags
                .iter()
                .any(|tag| record.tags.iter().any(|t| t == tag));
            if !tag_match {
                return false;
            }
        }

        if let Some(search) = &self.search_text {
            if !search.is_empty() && !Self::text_matches(search, record) {
                return false;
            }
        }

        true
    }

    fn text_matches(search: &str, record: &TransactionRecord) -> bool {
        let needle = search.to_lowercase();
        if record.category.to_lowercase().contains(&needle) {
            return true;
        }
        if let Some(note) = &record.note {
            if note.to_lowercase().contains(&needle) {
                return true;
            }
        }
        record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, TransactionKind};

    fn record(category: &str, date: &str, amount: f64, tags: &[&str]) -> TransactionRecord {
        TransactionRecord {
            id: "t1".into(),
            user_id: "alice".into(),
            kind: TransactionKind::Expense,
            category: category.to_string(),
            amount,
            currency: Currency::Usd,
            date: date.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            note: Some("weekly shop".into()),
            location: None,
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.matches(&record("Groceries", "2025-01-05", 42.0, &[])));
    }

    #[test]
    fn test_category_filter() {
        let criteria = FilterCriteria::new().category("Groceries");
        assert!(criteria.matches(&record("Groceries", "2025-01-05", 42.0, &[])));
        assert!(!criteria.matches(&record("Travel", "2025-01-05", 42.0, &[])));
    }

    #[test]
    fn test_amount_bounds_inclusive() {
        let criteria = FilterCriteria::new().amount_bounds(Some(10.0), Some(50.0));
        assert!(criteria.matches(&record("Groceries", "2025-01-05", 10.0, &[])));
        assert!(criteria.matches(&record("Groceries", "2025-01-05", 50.0, &[])));
        assert!(!criteria.matches(&record("Groceries", "2025-01-05", 9.99, &[])));
        assert!(!criteria.matches(&record("Groceries", "2025-01-05", 50.01, &[])));
    }

    #[test]
    fn test_tag_filter_matches_any() {
        let criteria = FilterCriteria::new().tags(vec!["work".into(), "travel".into()]);
        assert!(criteria.matches(&record("Dining", "2025-01-05", 20.0, &["travel"])));
        assert!(!criteria.matches(&record("Dining", "2025-01-05", 20.0, &["family"])));
        assert!(!criteria.matches(&record("Dining", "2025-01-05", 20.0, &[])));
    }

    #[test]
    fn test_search_text_is_case_insensitive() {
        let criteria = FilterCriteria::new().search("GROCER");
        assert!(criteria.matches(&record("Groceries", "2025-01-05", 42.0, &[])));

        // Matches note text too
        let criteria = FilterCriteria::new().search("Weekly");
        assert!(criteria.matches(&record("Groceries", "2025-01-05", 42.0, &[])));

        // And tags
        let criteria = FilterCriteria::new().search("organic");
        assert!(criteria.matches(&record("Groceries", "2025-01-05", 42.0, &["Organic"])));
        assert!(!criteria.matches(&record("Groceries", "2025-01-05", 42.0, &[])));
    }

    #[test]
    fn test_date_range_filter() {
        let criteria =
            FilterCriteria::new().date_range(DateRange::new("2025-01-01", "2025-01-31"));
        assert!(criteria.matches(&record("Groceries", "2025-01-31", 42.0, &[])));
        assert!(!criteria.matches(&record("Groceries", "2025-02-01", 42.0, &[])));
    }
}
