#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn make_txn(date: &str) -> Transaction {
    Transaction::new(dec!(10.00), date.into(), "Test".into(), Category::Food)
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("food"), Category::Food);
    assert_eq!(Category::parse("FOOD"), Category::Food);
    assert_eq!(Category::parse("  Rent "), Category::Rent);
    assert_eq!(Category::parse("healthcare"), Category::Healthcare);
    assert_eq!(Category::parse("unknown"), Category::Others);
}

#[test]
fn test_category_blank_defaults_to_others() {
    assert_eq!(Category::parse(""), Category::Others);
    assert_eq!(Category::parse("   "), Category::Others);
    assert_eq!(Category::default(), Category::Others);
}

#[test]
fn test_category_from_input_is_strict() {
    assert_eq!(Category::from_input("Shopping"), Some(Category::Shopping));
    assert_eq!(Category::from_input("shopping "), Some(Category::Shopping));
    assert_eq!(Category::from_input("Groceries"), None);
    assert_eq!(Category::from_input(""), None);
}

#[test]
fn test_category_all_round_trips_names() {
    assert_eq!(Category::all().len(), 8);
    for cat in Category::all() {
        assert_eq!(Category::parse(cat.as_str()), *cat);
        assert_eq!(cat.to_string(), cat.as_str());
    }
}

#[test]
fn test_category_serializes_as_name() {
    let json = serde_json::to_string(&Category::Entertainment).unwrap();
    assert_eq!(json, "\"Entertainment\"");
}

// ── Dates ─────────────────────────────────────────────────────

#[test]
fn test_plain_date() {
    let txn = make_txn("2024-03-15");
    assert_eq!(
        txn.calendar_date(),
        Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    );
    assert_eq!(txn.month_key().as_deref(), Some("2024-03"));
}

#[test]
fn test_rfc3339_date_normalised_to_utc() {
    // 23:30 at -05:00 is already the next day in UTC
    let txn = make_txn("2024-03-31T23:30:00-05:00");
    assert_eq!(txn.month_key().as_deref(), Some("2024-04"));

    let txn = make_txn("2024-03-01T00:00:00.000Z");
    assert_eq!(txn.month_key().as_deref(), Some("2024-03"));
}

#[test]
fn test_naive_datetime() {
    let txn = make_txn("2024-12-31T18:45:00");
    assert_eq!(txn.month_key().as_deref(), Some("2024-12"));
}

#[test]
fn test_unreadable_date() {
    assert_eq!(make_txn("yesterday").month_key(), None);
    assert_eq!(make_txn("").calendar_date(), None);
    assert_eq!(make_txn("2024-13-01").calendar_date(), None);
}

#[test]
fn test_is_month_key() {
    assert!(is_month_key("2024-01"));
    assert!(is_month_key("1999-12"));
    assert!(!is_month_key("2024-13"));
    assert!(!is_month_key("2024-1"));
    assert!(!is_month_key("2024-01-01"));
    assert!(!is_month_key("January"));
}

// ── Serialization ─────────────────────────────────────────────

#[test]
fn test_transaction_json_shape() {
    let mut txn = make_txn("2024-03-15");
    txn.id = Some(42);
    txn.created_at = "2024-03-15T10:00:00.000Z".into();

    let value = serde_json::to_value(&txn).unwrap();
    assert_eq!(value["_id"], "42");
    assert_eq!(value["amount"], 10.0);
    assert_eq!(value["category"], "Food");
    assert_eq!(value["createdAt"], "2024-03-15T10:00:00.000Z");
}

#[test]
fn test_budget_json_shape() {
    let mut budget = Budget::new(Category::Rent, "2024-03".into(), dec!(1200.50));
    budget.id = Some(7);

    let value = serde_json::to_value(&budget).unwrap();
    assert_eq!(value["_id"], "7");
    assert_eq!(value["budget"], 1200.5);
    assert_eq!(value["month"], "2024-03");
}

#[test]
fn test_timestamp_now_is_rfc3339_utc() {
    let ts = timestamp_now();
    assert!(ts.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
}
