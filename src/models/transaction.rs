use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{serialize_id, Category};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", serialize_with = "serialize_id")]
    pub id: Option<i64>,
    pub amount: Decimal,
    /// ISO-8601 date or date-time, as entered.
    pub date: String,
    pub description: String,
    pub category: Category,
    pub created_at: String,
}

impl Transaction {
    pub fn new(amount: Decimal, date: String, description: String, category: Category) -> Self {
        Self {
            id: None,
            amount,
            date,
            description,
            category,
            created_at: String::new(),
        }
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    /// "YYYY-MM" of the expense date, if the date is readable.
    pub fn month_key(&self) -> Option<String> {
        self.calendar_date().map(month_key_of)
    }
}

pub fn month_key_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Accepts `YYYY-MM-DD`, RFC 3339 (normalised to UTC) and naive `YYYY-MM-DDTHH:MM:SS[.f]`.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// True for a well-formed `YYYY-MM` month key.
pub fn is_month_key(s: &str) -> bool {
    s.len() == 7 && NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok()
}
