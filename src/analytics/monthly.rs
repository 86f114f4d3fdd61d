use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// "YYYY-MM"
    pub month: String,
    pub label: &'static str,
    pub amount: Decimal,
}

/// Twelve buckets, January to December of `year`. Transactions dated in
/// other years, or with unreadable dates, are left out.
pub fn monthly_totals(transactions: &[Transaction], year: i32) -> Vec<MonthlyTotal> {
    let mut buckets = [Decimal::ZERO; 12];
    for txn in transactions {
        let Some(date) = txn.calendar_date() else {
            continue;
        };
        if date.year() == year {
            let bucket = &mut buckets[date.month0() as usize];
            *bucket = bucket.saturating_add(txn.amount);
        }
    }

    buckets
        .iter()
        .zip(MONTH_LABELS)
        .enumerate()
        .map(|(i, (amount, label))| MonthlyTotal {
            month: format!("{year:04}-{:02}", i + 1),
            label,
            amount: *amount,
        })
        .collect()
}
