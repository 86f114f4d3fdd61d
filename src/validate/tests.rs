#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn txn_payload() -> TransactionPayload {
    TransactionPayload {
        amount: Some(dec!(42.50)),
        date: Some("2024-03-15".into()),
        description: Some("  Weekly groceries  ".into()),
        category: Some("food".into()),
    }
}

fn budget_payload() -> BudgetPayload {
    BudgetPayload {
        category: Some(" Rent ".into()),
        month: Some(" 2024-03 ".into()),
        budget: Some(dec!(1200)),
    }
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_valid_transaction_is_trimmed() {
    let new = txn_payload().into_new().unwrap();
    assert_eq!(new.amount, dec!(42.50));
    assert_eq!(new.date, "2024-03-15");
    assert_eq!(new.description, "Weekly groceries");
    assert_eq!(new.category, Category::Food);
}

#[test]
fn test_amount_must_be_positive() {
    for amount in [None, Some(dec!(0)), Some(dec!(-5))] {
        let payload = TransactionPayload {
            amount,
            ..txn_payload()
        };
        assert_eq!(payload.into_new(), Err(ValidationError::InvalidAmount));
    }
}

#[test]
fn test_amount_upper_bound() {
    assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_i64));
    let at_limit = TransactionPayload {
        amount: Some(MAX_AMOUNT),
        ..txn_payload()
    };
    assert_eq!(at_limit.into_new().unwrap().amount, MAX_AMOUNT);

    for amount in [
        MAX_AMOUNT + dec!(0.01),
        Decimal::from_i128_with_scale(10_i128.pow(27), 0),
        Decimal::MAX,
    ] {
        let payload = TransactionPayload {
            amount: Some(amount),
            ..txn_payload()
        };
        assert_eq!(payload.into_new(), Err(ValidationError::InvalidAmount));
    }
}

#[test]
fn test_date_required() {
    for date in [None, Some(String::new()), Some("   ".to_string())] {
        let payload = TransactionPayload {
            date,
            ..txn_payload()
        };
        assert_eq!(payload.into_new(), Err(ValidationError::MissingDate));
    }
}

#[test]
fn test_date_must_parse() {
    let payload = TransactionPayload {
        date: Some("next tuesday".into()),
        ..txn_payload()
    };
    assert_eq!(payload.into_new(), Err(ValidationError::InvalidDate));
}

#[test]
fn test_datetime_accepted() {
    let payload = TransactionPayload {
        date: Some("2024-03-15T08:30:00.000Z".into()),
        ..txn_payload()
    };
    assert!(payload.into_new().is_ok());
}

#[test]
fn test_description_required() {
    let payload = TransactionPayload {
        description: Some(" \t ".into()),
        ..txn_payload()
    };
    assert_eq!(payload.into_new(), Err(ValidationError::MissingDescription));
}

#[test]
fn test_category_required_on_create() {
    let payload = TransactionPayload {
        category: None,
        ..txn_payload()
    };
    assert_eq!(payload.into_new(), Err(ValidationError::MissingCategory));
}

#[test]
fn test_unknown_category_rejected() {
    let payload = TransactionPayload {
        category: Some("Crypto".into()),
        ..txn_payload()
    };
    assert_eq!(
        payload.into_new(),
        Err(ValidationError::UnknownCategory("Crypto".into()))
    );
}

#[test]
fn test_first_failure_reported() {
    let payload = TransactionPayload::default();
    assert_eq!(payload.into_new(), Err(ValidationError::InvalidAmount));

    let payload = TransactionPayload {
        amount: Some(dec!(1)),
        ..TransactionPayload::default()
    };
    assert_eq!(payload.into_new(), Err(ValidationError::MissingDate));
}

#[test]
fn test_changes_ignore_category() {
    let payload = TransactionPayload {
        category: Some("not a category".into()),
        ..txn_payload()
    };
    let changes = payload.into_changes().unwrap();
    assert_eq!(changes.description, "Weekly groceries");
}

#[test]
fn test_payload_from_json() {
    let payload: TransactionPayload = serde_json::from_str(
        r#"{"amount": 19.99, "date": "2024-01-02", "description": "Cinema", "category": "Entertainment"}"#,
    )
    .unwrap();
    let new = payload.into_new().unwrap();
    assert_eq!(new.amount, dec!(19.99));
    assert_eq!(new.category, Category::Entertainment);
}

#[test]
fn test_payload_missing_fields_from_json() {
    let payload: TransactionPayload = serde_json::from_str("{}").unwrap();
    assert_eq!(payload.into_new(), Err(ValidationError::InvalidAmount));
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_valid_budget() {
    let entry = budget_payload().into_entry().unwrap();
    assert_eq!(entry.category, Category::Rent);
    assert_eq!(entry.month, "2024-03");
    assert_eq!(entry.budget, dec!(1200));
}

#[test]
fn test_budget_category_required() {
    let payload = BudgetPayload {
        category: Some("".into()),
        ..budget_payload()
    };
    assert_eq!(payload.into_entry(), Err(ValidationError::MissingCategory));
}

#[test]
fn test_budget_month_required() {
    let payload = BudgetPayload {
        month: None,
        ..budget_payload()
    };
    assert_eq!(payload.into_entry(), Err(ValidationError::MissingMonth));
}

#[test]
fn test_budget_month_format() {
    for month in ["2024-3", "03-2024", "2024-13", "2024-03-01"] {
        let payload = BudgetPayload {
            month: Some(month.into()),
            ..budget_payload()
        };
        assert_eq!(payload.into_entry(), Err(ValidationError::InvalidMonth));
    }
}

#[test]
fn test_budget_amount_positive() {
    for budget in [None, Some(dec!(0)), Some(dec!(-100))] {
        let payload = BudgetPayload {
            budget,
            ..budget_payload()
        };
        assert_eq!(payload.into_entry(), Err(ValidationError::InvalidBudget));
    }
}

#[test]
fn test_budget_upper_bound() {
    for budget in [MAX_AMOUNT + dec!(1), Decimal::MAX] {
        let payload = BudgetPayload {
            budget: Some(budget),
            ..budget_payload()
        };
        assert_eq!(payload.into_entry(), Err(ValidationError::InvalidBudget));
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ValidationError::InvalidAmount.to_string(),
        "Amount must be a positive number"
    );
    assert_eq!(ValidationError::MissingDate.to_string(), "Date is required");
    assert_eq!(
        ValidationError::InvalidBudget.to_string(),
        "Budget must be a positive number"
    );
}
