use std::sync::MutexGuard;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiJson, ApiQuery, ApiResult};
use super::AppState;
use crate::analytics::{
    budget_comparison, category_totals, monthly_totals, month_summary, spending_insights,
    BudgetComparison, CategoryTotal, Dashboard, Insight, MonthSummary, MonthlyTotal,
};
use crate::models::{is_month_key, month_key_of, Budget, Transaction};
use crate::service::{Ledger, ServiceError};
use crate::session::WorkingSet;
use crate::validate::{BudgetPayload, TransactionPayload, ValidationError};

const FETCH_TRANSACTIONS: &str = "Failed to fetch transactions";
const CREATE_TRANSACTION: &str = "Failed to create transaction";
const UPDATE_TRANSACTION: &str = "Failed to update transaction";
const DELETE_TRANSACTION: &str = "Failed to delete transaction";
const FETCH_BUDGETS: &str = "Failed to fetch budgets";
const CREATE_BUDGET: &str = "Failed to create budget";
const UPDATE_BUDGET: &str = "Failed to update budget";
const DELETE_BUDGET: &str = "Failed to delete budget";
const COMPUTE_ANALYTICS: &str = "Failed to compute analytics";

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MonthQuery {
    month: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct YearQuery {
    year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InsightsResponse {
    summary: MonthSummary,
    insights: Vec<Insight>,
}

impl AppState {
    fn ledger(&self, context: &'static str) -> ApiResult<MutexGuard<'_, Ledger>> {
        self.ledger.lock().map_err(|_| {
            ApiError::from_service(
                ServiceError::Store(anyhow::anyhow!("ledger lock poisoned")),
                context,
            )
        })
    }

    fn working_set(&self) -> ApiResult<WorkingSet> {
        let ledger = self.ledger(COMPUTE_ANALYTICS)?;
        WorkingSet::load(&ledger).map_err(|e| ApiError::from_service(e, COMPUTE_ANALYTICS))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The requested month, or the current one when absent or blank.
fn resolve_month(query: MonthQuery) -> ApiResult<String> {
    match query.month.map(|m| m.trim().to_string()) {
        Some(month) if !month.is_empty() => {
            if is_month_key(&month) {
                Ok(month)
            } else {
                Err(ValidationError::InvalidMonth.into())
            }
        }
        _ => Ok(month_key_of(today())),
    }
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ── Transactions ──────────────────────────────────────────────

pub(crate) async fn list_transactions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let ledger = state.ledger(FETCH_TRANSACTIONS)?;
    let txns = ledger
        .list_transactions()
        .map_err(|e| ApiError::from_service(e, FETCH_TRANSACTIONS))?;
    Ok(Json(txns))
}

pub(crate) async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TransactionPayload>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let mut ledger = state.ledger(CREATE_TRANSACTION)?;
    let txn = ledger
        .create_transaction(payload)
        .map_err(|e| ApiError::from_service(e, CREATE_TRANSACTION))?;
    Ok((StatusCode::CREATED, Json(txn)))
}

pub(crate) async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<TransactionPayload>,
) -> ApiResult<Json<Transaction>> {
    let mut ledger = state.ledger(UPDATE_TRANSACTION)?;
    let txn = ledger
        .update_transaction(&id, payload)
        .map_err(|e| ApiError::from_service(e, UPDATE_TRANSACTION))?;
    Ok(Json(txn))
}

pub(crate) async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let mut ledger = state.ledger(DELETE_TRANSACTION)?;
    let deleted = ledger
        .delete_transaction(&id)
        .map_err(|e| ApiError::from_service(e, DELETE_TRANSACTION))?;
    if !deleted {
        return Err(ApiError::NotFound("Transaction not found"));
    }
    Ok(Json(MessageResponse {
        message: "Transaction deleted successfully",
    }))
}

// ── Budgets ───────────────────────────────────────────────────

pub(crate) async fn list_budgets(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<Vec<Budget>>> {
    let ledger = state.ledger(FETCH_BUDGETS)?;
    let budgets = ledger
        .list_budgets(query.month.as_deref())
        .map_err(|e| ApiError::from_service(e, FETCH_BUDGETS))?;
    Ok(Json(budgets))
}

pub(crate) async fn create_budget(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BudgetPayload>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let mut ledger = state.ledger(CREATE_BUDGET)?;
    let budget = ledger
        .create_budget(payload)
        .map_err(|e| ApiError::from_service(e, CREATE_BUDGET))?;
    Ok((StatusCode::CREATED, Json(budget)))
}

pub(crate) async fn update_budget(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BudgetPayload>,
) -> ApiResult<Json<Budget>> {
    let mut ledger = state.ledger(UPDATE_BUDGET)?;
    let budget = ledger
        .update_budget(payload)
        .map_err(|e| ApiError::from_service(e, UPDATE_BUDGET))?;
    Ok(Json(budget))
}

pub(crate) async fn delete_budget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let mut ledger = state.ledger(DELETE_BUDGET)?;
    let deleted = ledger
        .delete_budget(&id)
        .map_err(|e| ApiError::from_service(e, DELETE_BUDGET))?;
    if !deleted {
        return Err(ApiError::NotFound("Budget not found"));
    }
    Ok(Json(MessageResponse {
        message: "Budget deleted successfully",
    }))
}

// ── Analytics ─────────────────────────────────────────────────

pub(crate) async fn dashboard(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<Dashboard>> {
    let month = resolve_month(query)?;
    let set = state.working_set()?;
    Ok(Json(set.dashboard(&month, today())))
}

pub(crate) async fn categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryTotal>>> {
    let set = state.working_set()?;
    Ok(Json(category_totals(&set.transactions)))
}

pub(crate) async fn monthly(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> ApiResult<Json<Vec<MonthlyTotal>>> {
    let year = query.year.unwrap_or_else(|| today().year());
    let set = state.working_set()?;
    Ok(Json(monthly_totals(&set.transactions, year)))
}

pub(crate) async fn comparison(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<Vec<BudgetComparison>>> {
    let month = resolve_month(query)?;
    let set = state.working_set()?;
    Ok(Json(budget_comparison(&set.transactions, &set.budgets, &month)))
}

pub(crate) async fn insights(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<InsightsResponse>> {
    let month = resolve_month(query)?;
    let set = state.working_set()?;
    Ok(Json(InsightsResponse {
        summary: month_summary(&set.transactions, &set.budgets, &month),
        insights: spending_insights(&set.transactions, &set.budgets, &month),
    }))
}
