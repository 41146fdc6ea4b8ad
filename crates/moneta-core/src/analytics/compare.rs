//! Comparison of two arbitrary date ranges

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::models::{ComparisonResult, DateRange};

use super::AnalyticsEngine;

/// Percentage change from `old` to `new`
///
/// Explicit zero handling: both zero is 0, growth from zero is 100.
pub fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return if new == 0.0 { 0.0 } else { 100.0 };
    }
    ((new - old) / old) * 100.0
}

/// Human-readable band for a percentage change
pub fn change_description(percentage_change: f64) -> &'static str {
    if percentage_change > 10.0 {
        "significant increase"
    } else if percentage_change > 2.0 {
        "moderate increase"
    } else if percentage_change > -2.0 {
        "stable"
    } else if percentage_change > -10.0 {
        "moderate decrease"
    } else {
        "significant decrease"
    }
}

impl AnalyticsEngine<'_> {
    /// Percentage deltas between two date ranges
    ///
    /// Income, expenses, and balance each get a [`percentage_change`];
    /// categories are diffed over the union of both periods' category
    /// maps, reading 0 where a category is missing from one side.
    pub fn compare_periods(
        &self,
        user_id: &str,
        period1: &DateRange,
        period2: &DateRange,
    ) -> Result<ComparisonResult> {
        let income1 = self.total_income(user_id, period1)?;
        let income2 = self.total_income(user_id, period2)?;
        let expenses1 = self.total_expenses(user_id, period1)?;
        let expenses2 = self.total_expenses(user_id, period2)?;

        let categories1 = self.category_totals(user_id, period1)?;
        let categories2 = self.category_totals(user_id, period2)?;

        let all_categories: BTreeSet<&String> =
            categories1.keys().chain(categories2.keys()).collect();

        let mut category_changes = BTreeMap::new();
        for category in all_categories {
            let amount1 = categories1.get(category).copied().unwrap_or(0.0);
            let amount2 = categories2.get(category).copied().unwrap_or(0.0);
            category_changes.insert(category.clone(), percentage_change(amount1, amount2));
        }

        Ok(ComparisonResult {
            period1: period1.to_string(),
            period2: period2.to_string(),
            income_change_pct: percentage_change(income1, income2),
            expense_change_pct: percentage_change(expenses1, expenses2),
            balance_change_pct: percentage_change(income1 - expenses1, income2 - expenses2),
            category_changes,
        })
    }
}
