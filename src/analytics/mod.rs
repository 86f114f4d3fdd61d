//! Aggregation engine: derived views over an in-memory working set.
//!
//! Every function here is pure. Inputs are borrowed and never mutated, and
//! the only notion of "now" is whatever date or month the caller passes in.
//! Money stays in [`Decimal`]; percentages are computed in `Decimal` too so
//! that the insight thresholds (exactly 80, exactly 100) compare exactly.

mod budgets;
mod categories;
mod dashboard;
mod insights;
mod monthly;

pub use budgets::{budget_comparison, month_summary, BudgetComparison, MonthSummary};
pub use categories::{category_totals, top_categories, CategoryTotal};
pub use dashboard::{overview, recent_transactions, Dashboard, Overview};
pub use insights::{spending_insights, Insight, InsightStatus};
pub use monthly::{monthly_totals, MonthlyTotal};

use rust_decimal::Decimal;

/// `part / whole * 100`, or zero when there is no whole to divide by.
/// Saturates at `Decimal::MAX` instead of overflowing.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(Decimal::MAX)
}

/// Saturating sum. Totals clamp at `Decimal::MAX` rather than overflow.
pub(crate) fn total<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}
