//! A read-only snapshot of the store, as the reports consume it.
//!
//! Reconciling a cached copy after each create, update or delete belongs to
//! the presentation client; this side only ever reloads from the store.

use chrono::NaiveDate;

use crate::analytics::Dashboard;
use crate::models::{Budget, Transaction};
use crate::service::{Ledger, ServiceResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WorkingSet {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: Vec<Budget>,
}

impl WorkingSet {
    pub(crate) fn load(ledger: &Ledger) -> ServiceResult<Self> {
        Ok(Self {
            transactions: ledger.list_transactions()?,
            budgets: ledger.list_budgets(None)?,
        })
    }

    pub(crate) fn dashboard(&self, month: &str, today: NaiveDate) -> Dashboard {
        Dashboard::build(&self.transactions, &self.budgets, month, today)
    }
}

#[cfg(test)]
mod tests;
