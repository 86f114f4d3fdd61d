#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::validate::{BudgetPayload, TransactionPayload};

fn ledger() -> Ledger {
    Ledger::new(Database::open_in_memory().unwrap())
}

fn txn_payload(amount: rust_decimal::Decimal, description: &str) -> TransactionPayload {
    TransactionPayload {
        amount: Some(amount),
        date: Some("2024-03-15".into()),
        description: Some(description.into()),
        category: Some("Food".into()),
    }
}

fn budget_payload(month: &str, budget: rust_decimal::Decimal) -> BudgetPayload {
    BudgetPayload {
        category: Some("Food".into()),
        month: Some(month.into()),
        budget: Some(budget),
    }
}

#[test]
fn test_load_mirrors_store() {
    let mut ledger = ledger();
    ledger.create_transaction(txn_payload(dec!(10), "a")).unwrap();
    ledger.create_budget(budget_payload("2024-03", dec!(100))).unwrap();

    let set = WorkingSet::load(&ledger).unwrap();
    assert_eq!(set.transactions, ledger.list_transactions().unwrap());
    assert_eq!(set.budgets, ledger.list_budgets(None).unwrap());
}

#[test]
fn test_load_sees_later_writes_only_on_reload() {
    let mut ledger = ledger();
    ledger.create_transaction(txn_payload(dec!(10), "a")).unwrap();
    let stale = WorkingSet::load(&ledger).unwrap();

    ledger.create_transaction(txn_payload(dec!(20), "b")).unwrap();
    ledger.create_budget(budget_payload("2024-04", dec!(90))).unwrap();
    assert_eq!(stale.transactions.len(), 1);

    let fresh = WorkingSet::load(&ledger).unwrap();
    assert_eq!(fresh.transactions.len(), 2);
    assert_eq!(fresh.budgets.len(), 1);
}

#[test]
fn test_failed_round_trip_leaves_set_unchanged() {
    let mut ledger = ledger();
    ledger.create_transaction(txn_payload(dec!(10), "a")).unwrap();
    let set = WorkingSet::load(&ledger).unwrap();
    let before = set.clone();

    assert!(ledger.create_transaction(txn_payload(dec!(-5), "bad")).is_err());
    assert_eq!(set, before);
}

#[test]
fn test_dashboard_over_working_set() {
    let mut ledger = ledger();
    ledger.create_transaction(txn_payload(dec!(200), "a")).unwrap();
    ledger.create_budget(budget_payload("2024-03", dec!(150))).unwrap();
    let set = WorkingSet::load(&ledger).unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    let dash = set.dashboard("2024-03", today);
    assert_eq!(dash.overview.this_month_expenses, dec!(200));
    assert_eq!(dash.summary.total_remaining, dec!(-50));
    assert!(dash.budget_comparison[0].over_budget);
}
