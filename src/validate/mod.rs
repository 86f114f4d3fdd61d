//! Request payloads and their validation into typed commands.
//!
//! Payloads mirror the JSON bodies with every field optional so that a
//! missing field is reported with the same message as a blank one.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{is_month_key, parse_calendar_date, Category};

/// Largest accepted amount or budget (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be a positive number")]
    InvalidAmount,
    #[error("Date is required")]
    MissingDate,
    #[error("Date must be an ISO-8601 date")]
    InvalidDate,
    #[error("Description is required")]
    MissingDescription,
    #[error("Category is required")]
    MissingCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Month is required")]
    MissingMonth,
    #[error("Month must be formatted as YYYY-MM")]
    InvalidMonth,
    #[error("Budget must be a positive number")]
    InvalidBudget,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPayload {
    pub amount: Option<Decimal>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetPayload {
    pub category: Option<String>,
    pub month: Option<String>,
    pub budget: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub date: String,
    pub description: String,
    pub category: Category,
}

/// Fields a transaction update may touch. Category is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionChanges {
    pub amount: Decimal,
    pub date: String,
    pub description: String,
}

/// A budget keyed by (category, month).
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEntry {
    pub category: Category,
    pub month: String,
    pub budget: Decimal,
}

impl TransactionPayload {
    pub fn into_new(self) -> Result<NewTransaction, ValidationError> {
        let TransactionChanges {
            amount,
            date,
            description,
        } = self.changes()?;
        let category = required_category(self.category.as_deref())?;
        Ok(NewTransaction {
            amount,
            date,
            description,
            category,
        })
    }

    pub fn into_changes(self) -> Result<TransactionChanges, ValidationError> {
        self.changes()
    }

    fn changes(&self) -> Result<TransactionChanges, ValidationError> {
        let amount = positive(self.amount).ok_or(ValidationError::InvalidAmount)?;
        let date = non_blank(self.date.as_deref()).ok_or(ValidationError::MissingDate)?;
        if parse_calendar_date(&date).is_none() {
            return Err(ValidationError::InvalidDate);
        }
        let description =
            non_blank(self.description.as_deref()).ok_or(ValidationError::MissingDescription)?;
        Ok(TransactionChanges {
            amount,
            date,
            description,
        })
    }
}

impl BudgetPayload {
    pub fn into_entry(self) -> Result<BudgetEntry, ValidationError> {
        let category = required_category(self.category.as_deref())?;
        let month = non_blank(self.month.as_deref()).ok_or(ValidationError::MissingMonth)?;
        if !is_month_key(&month) {
            return Err(ValidationError::InvalidMonth);
        }
        let budget = positive(self.budget).ok_or(ValidationError::InvalidBudget)?;
        Ok(BudgetEntry {
            category,
            month,
            budget,
        })
    }
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO && *v <= MAX_AMOUNT)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required_category(value: Option<&str>) -> Result<Category, ValidationError> {
    let name = non_blank(value).ok_or(ValidationError::MissingCategory)?;
    Category::from_input(&name).ok_or(ValidationError::UnknownCategory(name))
}

#[cfg(test)]
mod tests;
