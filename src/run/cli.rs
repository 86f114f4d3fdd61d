use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;

use crate::analytics::{month_summary, spending_insights};
use crate::format::{format_amount, format_percent, truncate};
use crate::models::{is_month_key, month_key_of, Category};
use crate::service::Ledger;
use crate::session::WorkingSet;

const RULE_WIDTH: usize = 48;
const NAME_WIDTH: usize = 16;

fn resolve_month(month: Option<&str>, today: NaiveDate) -> Result<String> {
    match month {
        Some(m) if is_month_key(m) => Ok(m.to_string()),
        Some(m) => anyhow::bail!("Month must be formatted as YYYY-MM, got: {m}"),
        None => Ok(month_key_of(today)),
    }
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

pub(super) fn summary(ledger: &Ledger, month: Option<&str>, today: NaiveDate) -> Result<String> {
    let month = resolve_month(month, today)?;
    let set = WorkingSet::load(ledger)?;
    let dash = set.dashboard(&month, today);
    let ov = &dash.overview;
    let sum = &dash.summary;

    let mut out = String::new();
    writeln!(out, "Fintrack summary for {month}")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "  Total expenses:  {}", format_amount(ov.total_expenses))?;
    writeln!(out, "  This month:      {}", format_amount(ov.this_month_expenses))?;
    writeln!(out, "  Transactions:    {}", ov.transaction_count)?;
    writeln!(out, "  Categories:      {}", ov.category_count)?;
    writeln!(out)?;
    writeln!(out, "Budget for {month}:")?;
    writeln!(out, "  Budgeted:        {}", format_amount(sum.total_budgeted))?;
    writeln!(out, "  Spent:           {}", format_amount(sum.total_actual))?;
    writeln!(out, "  Remaining:       {}", format_amount(sum.total_remaining))?;

    if !dash.category_totals.is_empty() {
        writeln!(out)?;
        writeln!(out, "Spending by Category:")?;
        for total in &dash.category_totals {
            writeln!(
                out,
                "  {:<NAME_WIDTH$} {:>14} {:>5}%",
                total.category.as_str(),
                format_amount(total.amount),
                format_percent(total.percentage_of_whole),
            )?;
        }
    }
    Ok(out)
}

pub(super) fn insights(ledger: &Ledger, month: Option<&str>, today: NaiveDate) -> Result<String> {
    let month = resolve_month(month, today)?;
    let set = WorkingSet::load(ledger)?;
    let insights = spending_insights(&set.transactions, &set.budgets, &month);

    let mut out = String::new();
    writeln!(out, "Insights for {month}")?;
    writeln!(out, "{}", rule())?;
    if insights.is_empty() {
        writeln!(out, "  No spending or budgets recorded")?;
        return Ok(out);
    }

    for insight in &insights {
        writeln!(
            out,
            "  {:<13} {:<NAME_WIDTH$} {} / {}",
            format!("[{}]", insight.status),
            insight.category.as_str(),
            format_amount(insight.actual),
            format_amount(insight.budgeted),
        )?;
        writeln!(out, "    {}", truncate(&insight.message, RULE_WIDTH + 24))?;
    }

    let sum = month_summary(&set.transactions, &set.budgets, &month);
    writeln!(out)?;
    writeln!(out, "  Remaining:  {}", format_amount(sum.total_remaining))?;
    Ok(out)
}

pub(super) fn categories() -> String {
    Category::all()
        .iter()
        .map(|c| format!("{c}\n"))
        .collect()
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
