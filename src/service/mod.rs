//! CRUD service: validates requests, forwards them to the record store and
//! hands back the stored entities.

use thiserror::Error;

use crate::db::Database;
use crate::models::{timestamp_now, Budget, Transaction};
use crate::validate::{BudgetPayload, TransactionPayload, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

const TRANSACTION_NOT_FOUND: &str = "Transaction not found";
const BUDGET_NOT_FOUND: &str = "Budget not found";

pub(crate) struct Ledger {
    db: Database,
    clock: fn() -> String,
}

impl Ledger {
    pub(crate) fn new(db: Database) -> Self {
        Self {
            db,
            clock: timestamp_now,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(db: Database, clock: fn() -> String) -> Self {
        Self { db, clock }
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn list_transactions(&self) -> ServiceResult<Vec<Transaction>> {
        Ok(self.db.get_transactions()?)
    }

    pub(crate) fn create_transaction(
        &mut self,
        payload: TransactionPayload,
    ) -> ServiceResult<Transaction> {
        let new = payload.into_new()?;
        let mut txn = Transaction::new(new.amount, new.date, new.description, new.category);
        txn.created_at = (self.clock)();
        let stored = self.db.insert_transaction(&txn)?;
        tracing::info!(id = ?stored.id, category = %stored.category, amount = %stored.amount, "transaction created");
        Ok(stored)
    }

    pub(crate) fn update_transaction(
        &mut self,
        id: &str,
        payload: TransactionPayload,
    ) -> ServiceResult<Transaction> {
        let changes = payload.into_changes()?;
        let Some(id) = parse_id(id) else {
            return Err(ServiceError::NotFound(TRANSACTION_NOT_FOUND));
        };
        let updated = self
            .db
            .update_transaction(id, &changes)?
            .ok_or(ServiceError::NotFound(TRANSACTION_NOT_FOUND))?;
        tracing::info!(id, "transaction updated");
        Ok(updated)
    }

    /// `Ok(false)` when nothing matched the id.
    pub(crate) fn delete_transaction(&mut self, id: &str) -> ServiceResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = self.db.delete_transaction(id)?;
        if deleted {
            tracing::info!(id, "transaction deleted");
        }
        Ok(deleted)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn list_budgets(&self, month: Option<&str>) -> ServiceResult<Vec<Budget>> {
        let month = month.map(str::trim).filter(|m| !m.is_empty());
        Ok(self.db.get_budgets(month)?)
    }

    /// Upsert on (category, month).
    pub(crate) fn create_budget(&mut self, payload: BudgetPayload) -> ServiceResult<Budget> {
        let entry = payload.into_entry()?;
        let created_at = (self.clock)();
        let stored = self.db.upsert_budget(&entry, &created_at)?;
        tracing::info!(id = ?stored.id, category = %stored.category, month = %stored.month, "budget saved");
        Ok(stored)
    }

    pub(crate) fn update_budget(&mut self, payload: BudgetPayload) -> ServiceResult<Budget> {
        let entry = payload.into_entry()?;
        let updated = self
            .db
            .update_budget(entry.category, &entry.month, entry.budget)?
            .ok_or(ServiceError::NotFound(BUDGET_NOT_FOUND))?;
        tracing::info!(id = ?updated.id, "budget updated");
        Ok(updated)
    }

    /// `Ok(false)` when nothing matched the id.
    pub(crate) fn delete_budget(&mut self, id: &str) -> ServiceResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = self.db.delete_budget(id)?;
        if deleted {
            tracing::info!(id, "budget deleted");
        }
        Ok(deleted)
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
