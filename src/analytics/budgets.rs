use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{percent_of, total};
use crate::models::{Budget, Category, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparison {
    pub category: Category,
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub percentage_used: Decimal,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: String,
    pub total_budgeted: Decimal,
    pub total_actual: Decimal,
    /// Negative when the month as a whole is over budget.
    pub total_remaining: Decimal,
}

/// Budgeted and actual amounts for every category that has either a budget
/// or some spending in `month`.
pub(super) fn month_breakdown(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: &str,
) -> BTreeMap<Category, (Decimal, Decimal)> {
    let mut rows: BTreeMap<Category, (Decimal, Decimal)> = BTreeMap::new();

    for budget in budgets.iter().filter(|b| b.month == month) {
        // one budget per (category, month); the first one seen wins
        rows.entry(budget.category)
            .or_insert((budget.budget, Decimal::ZERO));
    }

    for txn in in_month(transactions, month) {
        let (_, actual) = rows
            .entry(txn.category)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        *actual = actual.saturating_add(txn.amount);
    }

    rows
}

pub(super) fn in_month<'a>(
    transactions: &'a [Transaction],
    month: &'a str,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |t| t.month_key().as_deref() == Some(month))
}

/// Budget against actual spending for `month`, largest combined magnitude first.
pub fn budget_comparison(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: &str,
) -> Vec<BudgetComparison> {
    let mut rows: Vec<BudgetComparison> = month_breakdown(transactions, budgets, month)
        .into_iter()
        .map(|(category, (budgeted, actual))| BudgetComparison {
            category,
            budgeted,
            actual,
            percentage_used: percent_of(actual, budgeted),
            over_budget: budgeted > Decimal::ZERO && actual > budgeted,
        })
        .collect();

    rows.sort_by(|a, b| {
        let magnitude = |r: &BudgetComparison| r.budgeted.saturating_add(r.actual);
        magnitude(b).cmp(&magnitude(a))
    });
    rows
}

pub fn month_summary(transactions: &[Transaction], budgets: &[Budget], month: &str) -> MonthSummary {
    let total_budgeted = total(budgets.iter().filter(|b| b.month == month).map(|b| b.budget));
    let total_actual = total(in_month(transactions, month).map(|t| t.amount));

    MonthSummary {
        month: month.to_string(),
        total_budgeted,
        total_actual,
        total_remaining: total_budgeted.saturating_sub(total_actual),
    }
}
