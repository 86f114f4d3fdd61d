use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::budgets::month_breakdown;
use super::percent_of;
use crate::format::format_percent;
use crate::models::{Budget, Category, Transaction};

const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const OVER_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightStatus {
    Over,
    Warning,
    Good,
    NoBudget,
}

impl InsightStatus {
    /// `Over` needs more than 100% used, so exactly 100% is `Warning`.
    /// `Warning` needs more than 80% used, so exactly 80% is `Good`.
    pub fn classify(budgeted: Decimal, percentage_used: Decimal) -> Self {
        if budgeted == Decimal::ZERO {
            Self::NoBudget
        } else if percentage_used > OVER_THRESHOLD {
            Self::Over
        } else if percentage_used > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Good
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Over => "Over Budget",
            Self::Warning => "Warning",
            Self::Good => "On Track",
            Self::NoBudget => "No Budget",
        }
    }
}

impl std::fmt::Display for InsightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub category: Category,
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub percentage_used: Decimal,
    pub status: InsightStatus,
    pub message: String,
}

impl Insight {
    fn new(category: Category, budgeted: Decimal, actual: Decimal) -> Self {
        let percentage_used = percent_of(actual, budgeted);
        let status = InsightStatus::classify(budgeted, percentage_used);
        let message = match status {
            InsightStatus::NoBudget => format!(
                "No budget set for {category}. Consider setting a budget to track spending."
            ),
            InsightStatus::Over => format!(
                "You've exceeded your {category} budget by ${:.2} this month.",
                actual
                    .saturating_sub(budgeted)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            ),
            InsightStatus::Warning => format!(
                "You've used {}% of your {category} budget.",
                format_percent(percentage_used)
            ),
            InsightStatus::Good => format!(
                "Your {category} budget is on track ({}% used).",
                format_percent(percentage_used)
            ),
        };

        Self {
            category,
            budgeted,
            actual,
            percentage_used,
            status,
            message,
        }
    }
}

/// Per-category insights for `month`: over-budget entries first, then the
/// rest by percentage used, highest first. Categories with neither a budget
/// nor any spending are omitted.
pub fn spending_insights(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: &str,
) -> Vec<Insight> {
    let mut insights: Vec<Insight> = month_breakdown(transactions, budgets, month)
        .into_iter()
        .filter(|(_, (budgeted, actual))| *budgeted > Decimal::ZERO || *actual > Decimal::ZERO)
        .map(|(category, (budgeted, actual))| Insight::new(category, budgeted, actual))
        .collect();

    insights.sort_by(|a, b| {
        let a_over = a.status == InsightStatus::Over;
        let b_over = b.status == InsightStatus::Over;
        b_over
            .cmp(&a_over)
            .then_with(|| b.percentage_used.cmp(&a.percentage_used))
    });
    insights
}
