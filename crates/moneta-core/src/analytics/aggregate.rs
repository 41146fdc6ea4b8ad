//! Ledger aggregation into per-month buckets

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{DateRange, MonthlyBucket};

use super::AnalyticsEngine;

/// Month key of an ISO date string: the leading `YYYY-MM`
///
/// This is the only place the substring convention lives. Dates are never
/// validated here; a malformed date lands in whatever bucket its first
/// seven characters spell.
pub(crate) fn month_key(date: &str) -> &str {
    date.get(..7).unwrap_or(date)
}

impl AnalyticsEngine<'_> {
    /// Aggregate a user's full ledger into monthly buckets
    ///
    /// Returns the most recent `months` buckets, newest first. Amounts are
    /// converted to the base currency before summing. An empty ledger
    /// yields an empty list, never an error.
    pub fn monthly_buckets(&self, user_id: &str, months: usize) -> Result<Vec<MonthlyBucket>> {
        let all = DateRange::all();
        let mut buckets: BTreeMap<String, MonthlyBucket> = BTreeMap::new();

        for expense in self.ledger.expenses(user_id, &all)? {
            let key = month_key(&expense.date);
            let bucket = buckets
                .entry(key.to_string())
                .or_insert_with(|| MonthlyBucket::new(key));
            let amount = self.to_base(&expense);
            bucket.total_expenses += amount;
            *bucket
                .category_spending
                .entry(expense.category.clone())
                .or_insert(0.0) += amount;
            bucket.transaction_count += 1;
        }

        for income in self.ledger.incomes(user_id, &all)? {
            let key = month_key(&income.date);
            let bucket = buckets
                .entry(key.to_string())
                .or_insert_with(|| MonthlyBucket::new(key));
            bucket.total_income += self.to_base(&income);
            bucket.transaction_count += 1;
        }

        let mut result: Vec<MonthlyBucket> = buckets
            .into_values()
            .map(|mut bucket| {
                bucket.balance = bucket.total_income - bucket.total_expenses;
                bucket
            })
            .collect();

        // Most recent first; lexicographic order is calendar order for ISO keys
        result.sort_by(|a, b| b.month.cmp(&a.month));
        result.truncate(months);

        tracing::debug!(
            user = user_id,
            buckets = result.len(),
            "Monthly aggregation complete"
        );
        Ok(result)
    }
}
