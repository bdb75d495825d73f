use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Year = i32;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub deposit: String,
    #[serde(default)]
    pub transport: String,
    #[serde(default)]
    pub food: String,
    #[serde(default)]
    pub medication: String,
    #[serde(default)]
    pub house: String,
    #[serde(default)]
    pub car: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub diverse: String,
}

/// Month name as sent by the client, e.g. "January".
///
/// Any label is accepted as long as it is not blank. It is stored exactly as
/// received, so "january" and "January" are different sheets. Request bodies
/// and the `/{year}/{month}` paths both go through this type, so a blank
/// month is rejected on reads and deletes as well as on saves.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthLabel(String);

impl MonthLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MonthLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("month must not be blank".to_string());
        }
        Ok(MonthLabel(value))
    }
}

impl From<MonthLabel> for String {
    fn from(label: MonthLabel) -> Self {
        label.0
    }
}

/// Request body for saving a month.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MonthExpensesCreate {
    pub month: MonthLabel,
    pub year: Year,
    pub rows: Vec<ExpenseRow>,
}

/// A month's sheet as it is persisted in the `expenses` collection.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MonthExpenses {
    pub month: String,
    pub year: Year,
    pub rows: Vec<ExpenseRow>,
    #[serde(default)]
    pub updated_at: Option<bson::DateTime>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MonthExpensesResponse {
    pub month: String,
    pub year: Year,
    pub rows: Vec<ExpenseRow>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<MonthExpenses> for MonthExpensesResponse {
    fn from(sheet: MonthExpenses) -> Self {
        MonthExpensesResponse {
            month: sheet.month,
            year: sheet.year,
            rows: sheet.rows,
            updated_at: sheet.updated_at.map(bson::DateTime::to_chrono),
        }
    }
}
