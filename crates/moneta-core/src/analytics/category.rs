//! Per-category spending analysis

use std::collections::BTreeMap;

use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::models::{CategorySummary, DateRange};

use super::AnalyticsEngine;

/// Months of history behind a category summary's trend classification
const TREND_WINDOW_MONTHS: usize = 6;

impl AnalyticsEngine<'_> {
    /// Expense totals grouped by category, in the base currency
    pub fn category_totals(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<BTreeMap<String, f64>> {
        let expenses = self.ledger.expenses(user_id, range)?;
        let mut totals = BTreeMap::new();
        for expense in &expenses {
            *totals.entry(expense.category.clone()).or_insert(0.0) += self.to_base(expense);
        }
        Ok(totals)
    }

    /// Full per-category statistics for a date range, sorted by total
    /// spent descending
    ///
    /// Attaches the first active budget's limit per category (0 when none)
    /// and classifies each category's trend over its recent monthly series.
    pub fn category_summaries(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<CategorySummary>> {
        let totals = self.category_totals(user_id, range)?;
        let grand_total: f64 = totals.values().sum();

        let mut summaries = Vec::with_capacity(totals.len());
        for (category, total_spent) in totals {
            let budget_limit = self
                .budget_repo()
                .active_budget(user_id, &category)?
                .map(|b| b.monthly_limit)
                .unwrap_or(0.0);

            let criteria = FilterCriteria::new()
                .date_range(range.clone())
                .category(category.clone());
            let transaction_count = self.filter_expenses(user_id, &criteria)?.len();
            let average_transaction = if transaction_count > 0 {
                total_spent / transaction_count as f64
            } else {
                0.0
            };

            let trend = self.category_trend(user_id, &category)?;

            summaries.push(CategorySummary {
                category,
                total_spent,
                budget_limit,
                percentage_of_total: if grand_total > 0.0 {
                    (total_spent / grand_total) * 100.0
                } else {
                    0.0
                },
                transaction_count,
                average_transaction,
                trend,
            });
        }

        summaries.sort_by(|a, b| {
            b.total_spent
                .partial_cmp(&a.total_spent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            user = user_id,
            categories = summaries.len(),
            "Category analysis complete"
        );
        Ok(summaries)
    }

    /// Names of the `count` biggest spending categories in the range
    pub fn top_categories(
        &self,
        user_id: &str,
        count: usize,
        range: &DateRange,
    ) -> Result<Vec<String>> {
        let totals = self.category_totals(user_id, range)?;

        let mut pairs: Vec<(String, f64)> = totals.into_iter().collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(pairs.into_iter().take(count).map(|(name, _)| name).collect())
    }

    /// Trend of one category's spending over its recent monthly series
    fn category_trend(
        &self,
        user_id: &str,
        category: &str,
    ) -> Result<crate::models::TrendDirection> {
        let buckets = self.monthly_buckets(user_id, TREND_WINDOW_MONTHS)?;
        let mut series: Vec<f64> = buckets
            .iter()
            .map(|b| b.category_spending.get(category).copied().unwrap_or(0.0))
            .collect();
        series.reverse();
        Ok(super::trend::trend_direction(&series))
    }
}
