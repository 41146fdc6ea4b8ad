//! Collaborator interfaces the analytics engine is given
//!
//! The engine holds no data of its own. Ledger records, budgets, and
//! savings goals live behind these traits, and reads observe a consistent
//! point-in-time snapshot; the mutation side is the data owner's concern.
//! `MemoryStore` is the bundled snapshot implementation, used by the test
//! suite and by embedders that keep everything in memory.

use crate::error::{Error, Result};
use crate::models::{Budget, Currency, DateRange, SavingsGoal, TransactionKind, TransactionRecord};

/// Read access to the transaction ledger
pub trait LedgerRepository {
    /// Expense records for a user inside a date range
    fn expenses(&self, user_id: &str, range: &DateRange) -> Result<Vec<TransactionRecord>>;

    /// Income records for a user inside a date range
    fn incomes(&self, user_id: &str, range: &DateRange) -> Result<Vec<TransactionRecord>>;
}

/// Read access to spending budgets
pub trait BudgetRepository {
    /// The first active budget for a user/category pair, if any
    fn active_budget(&self, user_id: &str, category: &str) -> Result<Option<Budget>>;

    /// All active budgets for a user
    fn active_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
}

/// Read access to savings goals
pub trait GoalRepository {
    /// All active savings goals for a user
    fn active_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>>;
}

/// Pluggable currency conversion
pub trait CurrencyConverter {
    fn convert(&self, amount: f64, from: Currency, to: Currency) -> f64;
}

/// In-memory snapshot of ledger, budget, and goal collections
///
/// Implements all three repository traits by filtering the snapshot.
/// Mutators exist for construction only; analytics never writes.
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct MemoryStore {
    transactions: Vec<TransactionRecord>,
    budgets: Vec<Budget>,
    goals: Vec<SavingsGoal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot previously serialized with [`MemoryStore::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot for persistence by the surrounding app
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_transaction(&mut self, record: TransactionRecord) {
        self.transactions.push(record);
    }

    pub fn add_budget(&mut self, budget: Budget) {
        self.budgets.push(budget);
    }

    pub fn add_goal(&mut self, goal: SavingsGoal) {
        self.goals.push(goal);
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    fn records(
        &self,
        user_id: &str,
        kind: TransactionKind,
        range: &DateRange,
    ) -> Vec<TransactionRecord> {
        self.transactions
            .iter()
            .filter(|tx| tx.user_id == user_id && tx.kind == kind && range.contains(&tx.date))
            .cloned()
            .collect()
    }
}

impl LedgerRepository for MemoryStore {
    fn expenses(&self, user_id: &str, range: &DateRange) -> Result<Vec<TransactionRecord>> {
        Ok(self.records(user_id, TransactionKind::Expense, range))
    }

    fn incomes(&self, user_id: &str, range: &DateRange) -> Result<Vec<TransactionRecord>> {
        Ok(self.records(user_id, TransactionKind::Income, range))
    }
}

impl BudgetRepository for MemoryStore {
    fn active_budget(&self, user_id: &str, category: &str) -> Result<Option<Budget>> {
        Ok(self
            .budgets
            .iter()
            .find(|b| b.user_id == user_id && b.category == category && b.active)
            .cloned())
    }

    fn active_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        Ok(self
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id && b.active)
            .cloned()
            .collect())
    }
}

impl GoalRepository for MemoryStore {
    fn active_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        Ok(self
            .goals
            .iter()
            .filter(|g| g.user_id == user_id && g.active)
            .cloned()
            .collect())
    }
}

/// Currency conversion from a fixed USD-pivot rate table
///
/// Rates express one USD in the target currency; conversion goes through
/// the pivot: `amount / rate(from) * rate(to)`. Real deployments swap in
/// a converter backed by a rate feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRates;

impl FixedRates {
    fn rate(currency: Currency) -> f64 {
        match currency {
            Currency::Usd => 1.0,
            Currency::Eur => 0.85,
            Currency::Gbp => 0.73,
            Currency::Jpy => 110.0,
            Currency::Cad => 1.25,
            Currency::Aud => 1.35,
        }
    }
}

impl CurrencyConverter for FixedRates {
    fn convert(&self, amount: f64, from: Currency, to: Currency) -> f64 {
        if from == to {
            return amount;
        }
        (amount / Self::rate(from)) * Self::rate(to)
    }
}

/// Validation used by data owners before a record enters a snapshot
pub fn validate_transaction(record: &TransactionRecord) -> Result<()> {
    if record.user_id.is_empty() {
        return Err(Error::InvalidData("transaction has no user id".into()));
    }
    if record.category.is_empty() {
        return Err(Error::InvalidData(
            "transaction has no category or source".into(),
        ));
    }
    if record.amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "transaction amount must be non-negative, got {}",
            record.amount
        )));
    }
    if record.date.is_empty() {
        return Err(Error::InvalidData("transaction has no date".into()));
    }
    Ok(())
}
