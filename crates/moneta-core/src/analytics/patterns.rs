//! Spending pattern detection
//!
//! Looks for weekday concentration, single-category dominance, and
//! month-to-month volatility, and reports each finding as a
//! human-readable string.

use chrono::{Datelike, NaiveDate};

use crate::error::Result;
use crate::models::DateRange;
use crate::stats;

use super::{format_currency, format_percentage, AnalyticsEngine};

/// Index 0 = Sunday, matching `num_days_from_sunday`
const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Share of total spend above which one category counts as dominant
const CONCENTRATION_THRESHOLD: f64 = 40.0;

/// Coefficient of variation above which monthly spending is flagged
const VOLATILITY_THRESHOLD: f64 = 0.3;

/// Months of history examined for the volatility check
const VOLATILITY_WINDOW_MONTHS: usize = 6;

impl AnalyticsEngine<'_> {
    /// Expense totals bucketed by weekday, index 0 = Sunday
    ///
    /// Records whose date does not parse are skipped rather than failing
    /// the whole aggregation.
    pub fn spending_by_day_of_week(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<[f64; 7]> {
        let expenses = self.ledger.expenses(user_id, range)?;
        let mut totals = [0.0f64; 7];
        for tx in &expenses {
            match NaiveDate::parse_from_str(&tx.date, "%Y-%m-%d") {
                Ok(date) => {
                    totals[date.weekday().num_days_from_sunday() as usize] += self.to_base(tx);
                }
                Err(_) => {
                    tracing::warn!(id = %tx.id, date = %tx.date, "Skipping unparseable date");
                }
            }
        }
        Ok(totals)
    }

    /// Notable spending patterns over the user's full history
    ///
    /// Each check contributes at most one line; no findings means an
    /// empty list, never an error.
    pub fn detect_spending_patterns(&self, user_id: &str) -> Result<Vec<String>> {
        let mut patterns = Vec::new();
        let all_time = DateRange::all();

        // Weekday with the highest expense total
        let day_totals = self.spending_by_day_of_week(user_id, &all_time)?;
        if let Some((peak_day, total)) = day_totals
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
        {
            if *total > 0.0 {
                patterns.push(format!("Highest spending on {}", DAY_NAMES[peak_day]));
            }
        }

        // Single category dominating overall spend
        let category_totals = self.category_totals(user_id, &all_time)?;
        let total_spending: f64 = category_totals.values().sum();
        if total_spending > 0.0 {
            if let Some((category, amount)) = category_totals
                .iter()
                .max_by(|a, b| a.1.total_cmp(b.1))
            {
                let percentage = amount / total_spending * 100.0;
                if percentage > CONCENTRATION_THRESHOLD {
                    patterns.push(format!(
                        "{} ({}) spent on {}",
                        format_currency(*amount),
                        format_percentage(percentage),
                        category
                    ));
                }
            }
        }

        // Month-to-month expense volatility
        let buckets = self.monthly_buckets(user_id, VOLATILITY_WINDOW_MONTHS)?;
        if buckets.len() >= 3 {
            let monthly_expenses: Vec<f64> = buckets.iter().map(|b| b.total_expenses).collect();
            let cv = stats::coefficient_of_variation(&monthly_expenses);
            if cv > VOLATILITY_THRESHOLD {
                patterns.push(format!(
                    "Highly variable spending patterns (CV: {})",
                    format_percentage(cv * 100.0)
                ));
            }
        }

        tracing::debug!(user = user_id, findings = patterns.len(), "Pattern detection done");
        Ok(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, TransactionKind, TransactionRecord};
    use crate::repository::{FixedRates, MemoryStore};

    fn expense(amount: f64, category: &str, date: &str) -> TransactionRecord {
        TransactionRecord {
            id: format!("{}-{}", date, category),
            user_id: "alice".into(),
            kind: TransactionKind::Expense,
            category: category.into(),
            amount,
            currency: Currency::Usd,
            date: date.into(),
            tags: vec![],
            note: None,
            location: None,
        }
    }

    #[test]
    fn test_day_of_week_buckets() {
        let mut store = MemoryStore::new();
        // 2025-01-05 is a Sunday, 2025-01-06 a Monday
        store.add_transaction(expense(100.0, "Groceries", "2025-01-05"));
        store.add_transaction(expense(50.0, "Groceries", "2025-01-12"));
        store.add_transaction(expense(25.0, "Transport", "2025-01-06"));

        let rates = FixedRates;
        let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
        let totals = engine
            .spending_by_day_of_week("alice", &DateRange::all())
            .unwrap();

        assert!((totals[0] - 150.0).abs() < 1e-9);
        assert!((totals[1] - 25.0).abs() < 1e-9);
        assert_eq!(totals[2], 0.0);
    }

    #[test]
    fn test_bad_dates_are_skipped() {
        let mut store = MemoryStore::new();
        store.add_transaction(expense(100.0, "Groceries", "2025-01-05"));
        store.add_transaction(expense(40.0, "Groceries", "not-a-date"));

        let rates = FixedRates;
        let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
        let totals = engine
            .spending_by_day_of_week("alice", &DateRange::all())
            .unwrap();
        let sum: f64 = totals.iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_peak_day_reported_by_name() {
        let mut store = MemoryStore::new();
        // Saturday spending dwarfs the rest of the week
        store.add_transaction(expense(300.0, "Dining", "2025-01-04"));
        store.add_transaction(expense(20.0, "Transport", "2025-01-06"));
        store.add_transaction(expense(400.0, "Groceries", "2025-02-03"));

        let rates = FixedRates;
        let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
        let patterns = engine.detect_spending_patterns("alice").unwrap();
        assert!(patterns.iter().any(|p| p == "Highest spending on Monday"));
    }

    #[test]
    fn test_category_concentration_flagged_over_threshold() {
        let mut store = MemoryStore::new();
        store.add_transaction(expense(900.0, "Rent", "2025-01-01"));
        store.add_transaction(expense(100.0, "Groceries", "2025-01-02"));

        let rates = FixedRates;
        let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
        let patterns = engine.detect_spending_patterns("alice").unwrap();
        assert!(patterns
            .iter()
            .any(|p| p == "$900.00 (90.0%) spent on Rent"));
    }

    #[test]
    fn test_balanced_categories_not_flagged() {
        let mut store = MemoryStore::new();
        for category in ["Rent", "Groceries", "Transport"] {
            store.add_transaction(expense(100.0, category, "2025-01-01"));
        }

        let rates = FixedRates;
        let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
        let patterns = engine.detect_spending_patterns("alice").unwrap();
        assert!(!patterns.iter().any(|p| p.contains("spent on")));
    }

    #[test]
    fn test_volatile_months_flagged() {
        let mut store = MemoryStore::new();
        store.add_transaction(expense(100.0, "Misc", "2025-01-15"));
        store.add_transaction(expense(2000.0, "Misc", "2025-02-15"));
        store.add_transaction(expense(150.0, "Misc", "2025-03-15"));

        let rates = FixedRates;
        let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
        let patterns = engine.detect_spending_patterns("alice").unwrap();
        assert!(patterns
            .iter()
            .any(|p| p.starts_with("Highly variable spending patterns")));
    }

    #[test]
    fn test_no_findings_for_empty_ledger() {
        let store = MemoryStore::new();
        let rates = FixedRates;
        let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
        assert!(engine.detect_spending_patterns("alice").unwrap().is_empty());
    }
}
