mod budget;
mod category;
mod transaction;

pub use budget::Budget;
pub use category::Category;
pub use transaction::{is_month_key, month_key_of, parse_calendar_date, Transaction};

use serde::Serializer;

/// Store ids are opaque to clients, so they travel as strings.
fn serialize_id<S: Serializer>(id: &Option<i64>, s: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => s.serialize_str(&id.to_string()),
        None => s.serialize_none(),
    }
}

/// Current UTC time as an RFC 3339 timestamp with millisecond precision.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests;
