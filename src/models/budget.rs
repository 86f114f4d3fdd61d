use rust_decimal::Decimal;
use serde::Serialize;

use super::{serialize_id, Category};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(rename = "_id", serialize_with = "serialize_id")]
    pub id: Option<i64>,
    pub category: Category,
    /// Format: "YYYY-MM"
    pub month: String,
    pub budget: Decimal,
    pub created_at: String,
}

impl Budget {
    pub fn new(category: Category, month: String, budget: Decimal) -> Self {
        Self {
            id: None,
            category,
            month,
            budget,
            created_at: String::new(),
        }
    }
}
