use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{percent_of, total};
use crate::models::{Category, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
    pub percentage_of_whole: Decimal,
}

/// Spending per category, largest first, with each category's share of the total.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut sums: BTreeMap<Category, Decimal> = BTreeMap::new();
    for txn in transactions {
        let sum = sums.entry(txn.category).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(txn.amount);
    }

    let grand_total = total(sums.values().copied());

    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category,
            amount,
            percentage_of_whole: percent_of(amount, grand_total),
        })
        .collect();

    // stable: equal amounts keep category order
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

pub fn top_categories(transactions: &[Transaction], n: usize) -> Vec<CategoryTotal> {
    let mut totals = category_totals(transactions);
    totals.truncate(n);
    totals
}
