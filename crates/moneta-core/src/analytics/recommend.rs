//! Advisory string generation
//!
//! Folds category growth, budget utilization, and goal progress into
//! plain-language recommendations, and summarizes overall financial
//! health as insight lines. Every signal is optional: a collaborator
//! failing or returning nothing drops that signal, it never fails the
//! whole report.

use chrono::Utc;

use crate::error::Result;
use crate::models::DateRange;

use super::{format_percentage, AnalyticsEngine};

/// Top spending categories examined for growth
const TOP_CATEGORY_COUNT: usize = 3;

/// Growth rate (percent over 6 months) that triggers a review nudge
const GROWTH_ALERT_THRESHOLD: f64 = 20.0;

/// Budget utilization below which the budget looks oversized
const LOW_UTILIZATION_THRESHOLD: f64 = 50.0;

/// Goal progress / deadline window that triggers a savings nudge
const GOAL_PROGRESS_THRESHOLD: f64 = 25.0;
const GOAL_DEADLINE_DAYS: i64 = 90;

/// Savings-rate bands for the insight summary
const SAVINGS_RATE_EXCELLENT: f64 = 20.0;
const SAVINGS_RATE_GOOD: f64 = 10.0;

impl AnalyticsEngine<'_> {
    /// Actionable recommendations for a user
    pub fn recommendations(&self, user_id: &str) -> Result<Vec<String>> {
        let mut recommendations = Vec::new();
        let all_time = DateRange::all();

        // Fast-growing top categories
        match self.top_categories(user_id, TOP_CATEGORY_COUNT, &all_time) {
            Ok(top) => {
                for category in top {
                    let growth = self.category_growth_rate(user_id, &category, 6)?;
                    if growth > GROWTH_ALERT_THRESHOLD {
                        recommendations.push(format!(
                            "Review {} spending - increased {} recently",
                            category,
                            format_percentage(growth)
                        ));
                    }
                }
            }
            Err(error) => {
                tracing::warn!(user = user_id, %error, "Skipping category growth signal");
            }
        }

        // Oversized budgets
        match self.budget_repo().active_budgets(user_id) {
            Ok(budgets) => {
                for budget in budgets {
                    let utilization = budget.utilization_percent();
                    if utilization < LOW_UTILIZATION_THRESHOLD {
                        recommendations.push(format!(
                            "Consider reducing {} budget - only {} utilized",
                            budget.category,
                            format_percentage(utilization)
                        ));
                    }
                }
            }
            Err(error) => {
                tracing::warn!(user = user_id, %error, "Skipping budget signal");
            }
        }

        // Goals at risk of missing their deadline
        match self.goal_repo().active_goals(user_id) {
            Ok(goals) => {
                let today = Utc::now().date_naive();
                for goal in goals {
                    // Unparseable deadlines are skipped, not reported
                    let Some(days_remaining) = goal.days_until_deadline(today) else {
                        continue;
                    };
                    if goal.progress_percent() < GOAL_PROGRESS_THRESHOLD
                        && days_remaining < GOAL_DEADLINE_DAYS
                    {
                        recommendations.push(format!(
                            "Increase savings for '{}' goal - {} days remaining",
                            goal.name, days_remaining
                        ));
                    }
                }
            }
            Err(error) => {
                tracing::warn!(user = user_id, %error, "Skipping goal signal");
            }
        }

        tracing::debug!(
            user = user_id,
            count = recommendations.len(),
            "Generated recommendations"
        );
        Ok(recommendations)
    }

    /// High-level health insights from the last six months
    ///
    /// Needs at least two months of history, otherwise the list is empty.
    pub fn financial_insights(&self, user_id: &str) -> Result<Vec<String>> {
        let mut insights = Vec::new();

        let buckets = self.monthly_buckets(user_id, 6)?;
        if buckets.len() < 2 {
            return Ok(insights);
        }

        let months = buckets.len() as f64;
        let avg_income: f64 = buckets.iter().map(|b| b.total_income).sum::<f64>() / months;
        let avg_expenses: f64 = buckets.iter().map(|b| b.total_expenses).sum::<f64>() / months;

        let savings_rate = if avg_income > 0.0 {
            (avg_income - avg_expenses) / avg_income * 100.0
        } else {
            0.0
        };

        if savings_rate > SAVINGS_RATE_EXCELLENT {
            insights.push(format!(
                "Excellent savings rate of {} - you're building wealth effectively!",
                format_percentage(savings_rate)
            ));
        } else if savings_rate > SAVINGS_RATE_GOOD {
            insights.push(format!(
                "Good savings rate of {} - consider increasing to 20% if possible.",
                format_percentage(savings_rate)
            ));
        } else if savings_rate > 0.0 {
            insights.push(format!(
                "Low savings rate of {} - look for opportunities to reduce expenses.",
                format_percentage(savings_rate)
            ));
        } else {
            insights.push(
                "Negative savings rate - expenses exceed income. Consider budgeting and expense reduction."
                    .to_string(),
            );
        }

        match self.budget_repo().active_budgets(user_id) {
            Ok(budgets) => {
                let exceeded = budgets.iter().filter(|b| b.is_exceeded()).count();
                if exceeded > 0 {
                    insights.push(format!("{} budget(s) exceeded this month.", exceeded));
                }
            }
            Err(error) => {
                tracing::warn!(user = user_id, %error, "Skipping budget performance signal");
            }
        }

        Ok(insights)
    }
}
