mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;
use crate::validate::{BudgetEntry, TransactionChanges};

const TRANSACTION_COLUMNS: &str = "id, amount, date, description, category, created_at";
const BUDGET_COLUMNS: &str = "id, category, month, budget, created_at";

/// Handle on the record store. Built once at startup and dropped at shutdown.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // an empty version table predates stamping
        let stored: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .context("Failed to read schema version")?
            .unwrap_or(0);

        if stored > schema::CURRENT_VERSION {
            anyhow::bail!(
                "Database schema version {stored} is newer than this build supports ({})",
                schema::CURRENT_VERSION
            );
        }
        if stored == schema::CURRENT_VERSION {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for &(from_version, sql) in schema::MIGRATIONS {
            if stored <= from_version {
                tracing::info!(from_version, "applying schema migration");
                tx.execute_batch(sql)?;
            }
        }
        tx.execute("DELETE FROM schema_version", [])?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![schema::CURRENT_VERSION],
        )?;
        tx.commit()?;
        tracing::info!(
            from = stored,
            to = schema::CURRENT_VERSION,
            "database schema upgraded"
        );

        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions (amount, date, description, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                txn.amount.to_string(),
                txn.date,
                txn.description,
                txn.category.as_str(),
                txn.created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_transaction(id)?
            .with_context(|| format!("Transaction {id} missing right after insert"))
    }

    /// Every transaction, newest first by creation time.
    pub(crate) fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"),
                params![id],
                row_to_transaction,
            )
            .optional()?)
    }

    pub(crate) fn update_transaction(
        &self,
        id: i64,
        changes: &TransactionChanges,
    ) -> Result<Option<Transaction>> {
        let updated = self.conn.execute(
            "UPDATE transactions SET amount = ?1, date = ?2, description = ?3 WHERE id = ?4",
            params![
                changes.amount.to_string(),
                changes.date,
                changes.description,
                id
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.get_transaction(id)
    }

    /// Returns whether a row was actually removed.
    pub(crate) fn delete_transaction(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(deleted == 1)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budgets(&self, month: Option<&str>) -> Result<Vec<Budget>> {
        let (sql, param_values): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match month {
            Some(m) => (
                format!(
                    "SELECT {BUDGET_COLUMNS} FROM budgets WHERE month = ?1
                     ORDER BY created_at DESC, id DESC"
                ),
                vec![Box::new(m.to_string())],
            ),
            None => (
                format!("SELECT {BUDGET_COLUMNS} FROM budgets ORDER BY created_at DESC, id DESC"),
                vec![],
            ),
        };

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), row_to_budget)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE id = ?1"),
                params![id],
                row_to_budget,
            )
            .optional()?)
    }

    pub(crate) fn find_budget(&self, category: Category, month: &str) -> Result<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE category = ?1 AND month = ?2"),
                params![category.as_str(), month],
                row_to_budget,
            )
            .optional()?)
    }

    /// Find-or-create on (category, month). An existing pair has its amount
    /// and `created_at` overwritten; a new pair is inserted.
    pub(crate) fn upsert_budget(&mut self, entry: &BudgetEntry, created_at: &str) -> Result<Budget> {
        let tx = self.conn.transaction()?;
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM budgets WHERE category = ?1 AND month = ?2",
                params![entry.category.as_str(), entry.month],
                |row| row.get(0),
            )
            .optional()?;

        let id = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE budgets SET budget = ?1, created_at = ?2 WHERE id = ?3",
                    params![entry.budget.to_string(), created_at, id],
                )?;
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO budgets (category, month, budget, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        entry.category.as_str(),
                        entry.month,
                        entry.budget.to_string(),
                        created_at,
                    ],
                )?;
                tx.last_insert_rowid()
            }
        };
        tx.commit()?;

        self.get_budget(id)?
            .with_context(|| format!("Budget {id} missing right after upsert"))
    }

    pub(crate) fn update_budget(
        &self,
        category: Category,
        month: &str,
        amount: Decimal,
    ) -> Result<Option<Budget>> {
        let updated = self.conn.execute(
            "UPDATE budgets SET budget = ?1 WHERE category = ?2 AND month = ?3",
            params![amount.to_string(), category.as_str(), month],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.find_budget(category, month)
    }

    /// Returns whether a row was actually removed.
    pub(crate) fn delete_budget(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM budgets WHERE id = ?1", params![id])?;
        Ok(deleted == 1)
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount_str: String = row.get(1)?;
    let category: String = row.get(4)?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        date: row.get(2)?,
        description: row.get(3)?,
        category: Category::parse(&category),
        created_at: row.get(5)?,
    })
}

fn row_to_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let category: String = row.get(1)?;
    let amt_str: String = row.get(3)?;
    Ok(Budget {
        id: Some(row.get(0)?),
        category: Category::parse(&category),
        month: row.get(2)?,
        budget: Decimal::from_str(&amt_str).unwrap_or_default(),
        created_at: row.get(4)?,
    })
}
