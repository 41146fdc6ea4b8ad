//! Analytics Engine - financial analytics and forecasting
//!
//! Turns an injected ledger snapshot into monthly summaries, category
//! breakdowns, period comparisons, short-horizon forecasts, and rule-based
//! recommendations. Every operation is a synchronous, pure query over a
//! point-in-time snapshot; the engine holds no state of its own and never
//! writes to the ledger.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use moneta_core::analytics::AnalyticsEngine;
//!
//! let engine = AnalyticsEngine::new(&store, &store, &store, &rates);
//! let forecast = engine.generate_forecast("alice", 3)?;
//! let advice = engine.recommendations("alice")?;
//! ```

mod aggregate;
mod category;
pub mod compare;
mod forecast;
mod patterns;
mod recommend;
pub mod trend;

pub use compare::{change_description, percentage_change};
pub use trend::{growth_rate, trend_direction};

use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::models::{Currency, DateRange, TransactionRecord};
use crate::repository::{
    BudgetRepository, CurrencyConverter, GoalRepository, LedgerRepository,
};

/// The analytics engine
///
/// Borrows its four collaborators for the lifetime of the engine value;
/// a fresh engine per request is cheap since nothing is cached.
pub struct AnalyticsEngine<'a> {
    ledger: &'a dyn LedgerRepository,
    budgets: &'a dyn BudgetRepository,
    goals: &'a dyn GoalRepository,
    rates: &'a dyn CurrencyConverter,
    base_currency: Currency,
}

impl<'a> AnalyticsEngine<'a> {
    /// Create an engine reporting in USD
    pub fn new(
        ledger: &'a dyn LedgerRepository,
        budgets: &'a dyn BudgetRepository,
        goals: &'a dyn GoalRepository,
        rates: &'a dyn CurrencyConverter,
    ) -> Self {
        Self {
            ledger,
            budgets,
            goals,
            rates,
            base_currency: Currency::Usd,
        }
    }

    /// Report in a different base currency
    pub fn with_base_currency(mut self, currency: Currency) -> Self {
        self.base_currency = currency;
        self
    }

    /// The currency all totals are reported in
    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    /// A record's amount converted to the reporting currency
    pub(crate) fn to_base(&self, record: &TransactionRecord) -> f64 {
        self.rates
            .convert(record.amount, record.currency, self.base_currency)
    }

    pub(crate) fn budget_repo(&self) -> &dyn BudgetRepository {
        self.budgets
    }

    pub(crate) fn goal_repo(&self) -> &dyn GoalRepository {
        self.goals
    }

    /// Total income for a user inside a date range, in the base currency
    pub fn total_income(&self, user_id: &str, range: &DateRange) -> Result<f64> {
        let incomes = self.ledger.incomes(user_id, range)?;
        Ok(incomes.iter().map(|tx| self.to_base(tx)).sum())
    }

    /// Total expenses for a user inside a date range, in the base currency
    pub fn total_expenses(&self, user_id: &str, range: &DateRange) -> Result<f64> {
        let expenses = self.ledger.expenses(user_id, range)?;
        Ok(expenses.iter().map(|tx| self.to_base(tx)).sum())
    }

    /// Income minus expenses for a user inside a date range
    pub fn balance(&self, user_id: &str, range: &DateRange) -> Result<f64> {
        Ok(self.total_income(user_id, range)? - self.total_expenses(user_id, range)?)
    }

    /// Mean monthly income over the most recent `months` buckets
    pub fn average_monthly_income(&self, user_id: &str, months: usize) -> Result<f64> {
        let buckets = self.monthly_buckets(user_id, months)?;
        if buckets.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = buckets.iter().map(|b| b.total_income).sum();
        Ok(total / buckets.len() as f64)
    }

    /// Mean monthly expenses over the most recent `months` buckets
    pub fn average_monthly_expenses(&self, user_id: &str, months: usize) -> Result<f64> {
        let buckets = self.monthly_buckets(user_id, months)?;
        if buckets.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = buckets.iter().map(|b| b.total_expenses).sum();
        Ok(total / buckets.len() as f64)
    }

    /// Expense records matching a filter, fetched for the filter's range
    pub fn filter_expenses(
        &self,
        user_id: &str,
        criteria: &FilterCriteria,
    ) -> Result<Vec<TransactionRecord>> {
        let mut records = self.ledger.expenses(user_id, &criteria.date_range)?;
        records.retain(|tx| criteria.matches(tx));
        Ok(records)
    }

    /// Income records matching a filter, fetched for the filter's range
    pub fn filter_incomes(
        &self,
        user_id: &str,
        criteria: &FilterCriteria,
    ) -> Result<Vec<TransactionRecord>> {
        let mut records = self.ledger.incomes(user_id, &criteria.date_range)?;
        records.retain(|tx| criteria.matches(tx));
        Ok(records)
    }
}

/// Render an amount as `$1234.56`
pub(crate) fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Render a percentage as `12.3%`
pub(crate) fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}
