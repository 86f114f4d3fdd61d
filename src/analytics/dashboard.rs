use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::budgets::in_month;
use super::*;
use crate::models::{month_key_of, Budget, Transaction};

const TOP_CATEGORY_COUNT: usize = 3;
const RECENT_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_expenses: Decimal,
    pub this_month_expenses: Decimal,
    pub transaction_count: usize,
    pub category_count: usize,
}

/// Headline numbers. "This month" is the calendar month containing `today`.
pub fn overview(transactions: &[Transaction], today: NaiveDate) -> Overview {
    let this_month = month_key_of(today);
    let categories: BTreeSet<_> = transactions.iter().map(|t| t.category).collect();

    Overview {
        total_expenses: total(transactions.iter().map(|t| t.amount)),
        this_month_expenses: total(in_month(transactions, &this_month).map(|t| t.amount)),
        transaction_count: transactions.len(),
        category_count: categories.len(),
    }
}

/// The `n` most recently created transactions.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    recent.into_iter().take(n).cloned().collect()
}

/// Every derived view the dashboard shows, for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub month: String,
    pub overview: Overview,
    pub category_totals: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub budget_comparison: Vec<BudgetComparison>,
    pub insights: Vec<Insight>,
    pub summary: MonthSummary,
    pub recent_transactions: Vec<Transaction>,
}

impl Dashboard {
    pub fn build(
        transactions: &[Transaction],
        budgets: &[Budget],
        month: &str,
        today: NaiveDate,
    ) -> Self {
        Self {
            month: month.to_string(),
            overview: overview(transactions, today),
            category_totals: category_totals(transactions),
            top_categories: top_categories(transactions, TOP_CATEGORY_COUNT),
            monthly_totals: monthly_totals(transactions, today.year()),
            budget_comparison: budget_comparison(transactions, budgets, month),
            insights: spending_insights(transactions, budgets, month),
            summary: month_summary(transactions, budgets, month),
            recent_transactions: recent_transactions(transactions, RECENT_COUNT),
        }
    }
}
