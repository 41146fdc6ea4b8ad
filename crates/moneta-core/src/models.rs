//! Domain models for Moneta
//!
//! Everything here is a value object: produced fresh per query, never
//! holding state between calls. The ledger snapshot itself is owned by the
//! repository collaborators (see `crate::repository`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Supported currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Jpy => "jpy",
            Self::Cad => "cad",
            Self::Aud => "aud",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "eur" => Ok(Self::Eur),
            "gbp" => Ok(Self::Gbp),
            "jpy" => Ok(Self::Jpy),
            "cad" => Ok(Self::Cad),
            "aud" => Ok(Self::Aud),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a ledger record is money out or money in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger record (expense or income)
///
/// `amount` is non-negative by convention; `kind` carries the sign.
/// For incomes, `category` holds the income source. `date` is an ISO
/// `YYYY-MM-DD` string; the engine orders dates lexicographically, which
/// is calendar-correct for well-formed ISO dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    /// Spending category, or income source for `TransactionKind::Income`
    pub category: String,
    pub amount: f64,
    pub currency: Currency,
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// An inclusive date range over ISO date strings
///
/// An empty string on either side means that bound is open. Comparison is
/// lexicographic, matching the ledger's date convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Range with both bounds open (matches every date)
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether `date` falls inside the range, inclusive on both ends
    pub fn contains(&self, date: &str) -> bool {
        if self.start.is_empty() && self.end.is_empty() {
            return true;
        }
        if self.start.is_empty() {
            return date <= self.end.as_str();
        }
        if self.end.is_empty() {
            return date >= self.start.as_str();
        }
        date >= self.start.as_str() && date <= self.end.as_str()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.is_empty() && self.end.is_empty() {
            write!(f, "all time")
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

/// A spending budget for one category, owned by the budget repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub monthly_limit: f64,
    pub current_spent: f64,
    pub active: bool,
}

impl Budget {
    /// Spent as a percentage of the limit, 0 when the limit is not positive
    pub fn utilization_percent(&self) -> f64 {
        if self.monthly_limit > 0.0 {
            (self.current_spent / self.monthly_limit) * 100.0
        } else {
            0.0
        }
    }

    /// Whether spending has exceeded the monthly limit
    pub fn is_exceeded(&self) -> bool {
        self.current_spent > self.monthly_limit
    }
}

/// A savings goal with a target amount and deadline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// ISO `YYYY-MM-DD` deadline
    pub deadline: String,
    pub active: bool,
}

impl SavingsGoal {
    /// Progress toward the target as a percentage, 0 when the target is not positive
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount) * 100.0
        } else {
            0.0
        }
    }

    /// Human-readable progress band
    pub fn status(&self) -> &'static str {
        let progress = self.progress_percent();
        if progress >= 100.0 {
            "Completed"
        } else if progress >= 75.0 {
            "Nearly There"
        } else if progress >= 50.0 {
            "Halfway"
        } else if progress >= 25.0 {
            "Making Progress"
        } else {
            "Just Started"
        }
    }

    /// Days from `today` until the deadline, None when the deadline
    /// string is not a parseable ISO date
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        let deadline = NaiveDate::parse_from_str(&self.deadline, "%Y-%m-%d").ok()?;
        Some((deadline - today).num_days())
    }
}

/// Aggregated income/expense/category totals for one user in one month
///
/// Keyed by the `YYYY-MM` month string. `balance` is always derived from
/// income minus expenses, never stored independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: String,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub category_spending: BTreeMap<String, f64>,
    pub transaction_count: usize,
}

impl MonthlyBucket {
    pub(crate) fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            total_income: 0.0,
            total_expenses: 0.0,
            balance: 0.0,
            category_spending: BTreeMap::new(),
            transaction_count: 0,
        }
    }
}

/// Qualitative slope classification of a numeric series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrendDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "increasing" => Ok(Self::Increasing),
            "decreasing" => Ok(Self::Decreasing),
            "stable" => Ok(Self::Stable),
            _ => Err(format!("Unknown trend direction: {}", s)),
        }
    }
}

/// Per-category spending statistics for a date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_spent: f64,
    /// Limit of the first active budget for this category, 0 when none
    pub budget_limit: f64,
    /// Share of the grand total, 0-100
    pub percentage_of_total: f64,
    pub transaction_count: usize,
    pub average_transaction: f64,
    pub trend: TrendDirection,
}

/// One month of projected income and expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// `YYYY-MM` label of the projected month
    pub period: String,
    pub predicted_income: f64,
    pub predicted_expenses: f64,
    pub predicted_balance: f64,
    /// Reliability indicator in [0.1, 0.95], inversely related to volatility
    pub confidence: f64,
}

/// Percentage deltas between two date ranges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub period1: String,
    pub period2: String,
    pub income_change_pct: f64,
    pub expense_change_pct: f64,
    pub balance_change_pct: f64,
    /// Per-category change over the union of categories seen in either period
    pub category_changes: BTreeMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::new("2025-01-01", "2025-01-31");
        assert!(range.contains("2025-01-01"));
        assert!(range.contains("2025-01-15"));
        assert!(range.contains("2025-01-31"));
        assert!(!range.contains("2024-12-31"));
        assert!(!range.contains("2025-02-01"));
    }

    #[test]
    fn test_date_range_open_bounds() {
        assert!(DateRange::all().contains("1999-01-01"));
        assert!(DateRange::new("", "2025-06-30").contains("2020-01-01"));
        assert!(!DateRange::new("", "2025-06-30").contains("2025-07-01"));
        assert!(DateRange::new("2025-06-30", "").contains("2026-01-01"));
        assert!(!DateRange::new("2025-06-30", "").contains("2025-06-29"));
    }

    #[test]
    fn test_budget_utilization() {
        let budget = Budget {
            id: "b1".into(),
            user_id: "u1".into(),
            category: "Food & Dining".into(),
            monthly_limit: 400.0,
            current_spent: 100.0,
            active: true,
        };
        assert!((budget.utilization_percent() - 25.0).abs() < 1e-9);
        assert!(!budget.is_exceeded());

        let unlimited = Budget {
            monthly_limit: 0.0,
            ..budget
        };
        assert_eq!(unlimited.utilization_percent(), 0.0);
    }

    #[test]
    fn test_goal_progress_and_status() {
        let mut goal = SavingsGoal {
            id: "g1".into(),
            user_id: "u1".into(),
            name: "Vacation".into(),
            target_amount: 1000.0,
            current_amount: 600.0,
            deadline: "2026-12-31".into(),
            active: true,
        };
        assert!((goal.progress_percent() - 60.0).abs() < 1e-9);
        assert_eq!(goal.status(), "Halfway");

        goal.target_amount = 0.0;
        assert_eq!(goal.progress_percent(), 0.0);
        assert_eq!(goal.status(), "Just Started");
    }

    #[test]
    fn test_goal_days_until_deadline() {
        let goal = SavingsGoal {
            id: "g1".into(),
            user_id: "u1".into(),
            name: "Vacation".into(),
            target_amount: 1000.0,
            current_amount: 0.0,
            deadline: "2026-03-11".into(),
            active: true,
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(goal.days_until_deadline(today), Some(10));

        let broken = SavingsGoal {
            deadline: "soon".into(),
            ..goal
        };
        assert_eq!(broken.days_until_deadline(today), None);
    }

    #[test]
    fn test_currency_round_trip() {
        assert_eq!(Currency::Eur.as_str(), "eur");
        assert_eq!("GBP".parse::<Currency>().unwrap(), Currency::Gbp);
        assert!("xyz".parse::<Currency>().is_err());
    }

    #[test]
    fn test_trend_direction_serialization() {
        assert_eq!(
            serde_json::to_string(&TrendDirection::Increasing).unwrap(),
            "\"increasing\""
        );
        assert_eq!(
            "decreasing".parse::<TrendDirection>().unwrap(),
            TrendDirection::Decreasing
        );
    }
}
