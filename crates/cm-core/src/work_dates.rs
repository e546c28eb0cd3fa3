//! Boundary validation for the backend's dynamic `work_dates` field.
//!
//! The backend stores work dates as free-form JSON. Everything past this
//! module works with `Vec<NaiveDate>`; malformed payloads are rejected
//! here with a typed error instead of being passed through.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WorkDatesError {
    #[error("work_dates must be an array of dates, got {0}")]
    NotAnArray(&'static str),
    #[error("work_dates[{index}] is not a string")]
    NotAString { index: usize },
    #[error("work_dates[{index}] is not a valid date: {value}")]
    InvalidDate { index: usize, value: String },
}

/// Parse `work_dates` from a raw backend row. `null` / missing maps to an
/// empty list; anything other than an array of `YYYY-MM-DD` strings is an
/// error. Duplicates are kept, order is preserved.
pub fn parse_work_dates(value: &Value) -> Result<Vec<NaiveDate>, WorkDatesError> {
    let entries = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        Value::Object(_) => return Err(WorkDatesError::NotAnArray("object")),
        Value::String(_) => return Err(WorkDatesError::NotAnArray("string")),
        Value::Number(_) => return Err(WorkDatesError::NotAnArray("number")),
        Value::Bool(_) => return Err(WorkDatesError::NotAnArray("bool")),
    };

    let mut dates = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let raw = entry
            .as_str()
            .ok_or(WorkDatesError::NotAString { index })?;
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            WorkDatesError::InvalidDate {
                index,
                value: raw.to_string(),
            }
        })?;
        dates.push(date);
    }

    Ok(dates)
}
