//! Moneta Core Library
//!
//! Analytics and forecasting for personal finance data:
//! - Descriptive statistics (regression, volatility, outliers)
//! - Monthly aggregation of raw transaction snapshots
//! - Trend, category, and period-over-period analysis
//! - Short-horizon income/expense forecasting
//! - Spending pattern detection and plain-language recommendations
//!
//! Everything is driven through [`analytics::AnalyticsEngine`], which reads
//! from injected repository traits and never mutates the ledger.

pub mod analytics;
pub mod error;
pub mod filter;
pub mod models;
pub mod repository;
pub mod stats;

pub use analytics::AnalyticsEngine;
pub use error::{Error, Result};
pub use filter::FilterCriteria;
pub use models::{
    Budget, CategorySummary, ComparisonResult, Currency, DateRange, ForecastPoint, MonthlyBucket,
    SavingsGoal, TransactionKind, TransactionRecord, TrendDirection,
};
pub use repository::{
    BudgetRepository, CurrencyConverter, FixedRates, GoalRepository, LedgerRepository, MemoryStore,
};
