//! Response validation
//!
//! Two steps turn a raw status API body into something the bot can act on:
//! - [`validate`] checks the envelope (`current_date` and `homeworks`)
//! - [`extract`] resolves a single work item against the verdict table
//!
//! Both fail closed: any deviation from the expected schema is an error.

use serde_json::{Map, Value as JsonValue};

use crate::domain::poll::{PollResult, WorkItemStatus};
use crate::domain::status::{StatusCode, VerdictTable};
use crate::error::{Result, ValidationError};

pub const CURRENT_DATE_FIELD: &str = "current_date";
pub const ITEMS_FIELD: &str = "homeworks";
pub const NAME_FIELD: &str = "homework_name";
pub const STATUS_FIELD: &str = "status";

/// Checks the envelope of a status API response
///
/// # Arguments
/// * `raw` - The decoded response body
///
/// # Returns
/// The poll result with the server timestamp and the raw item list
pub fn validate(raw: &JsonValue) -> Result<PollResult> {
    let body = raw
        .as_object()
        .ok_or_else(|| ValidationError::wrong_type("response", "object", raw))?;

    let fetched_at = match body.get(CURRENT_DATE_FIELD) {
        None | Some(JsonValue::Null) => {
            return Err(ValidationError::MissingField(CURRENT_DATE_FIELD.to_string()));
        }
        Some(value) => value
            .as_i64()
            .ok_or_else(|| ValidationError::wrong_type(CURRENT_DATE_FIELD, "integer", value))?,
    };

    let items = match body.get(ITEMS_FIELD) {
        None | Some(JsonValue::Null) => {
            return Err(ValidationError::MissingField(ITEMS_FIELD.to_string()));
        }
        Some(JsonValue::Array(items)) => items.clone(),
        Some(value) => return Err(ValidationError::wrong_type(ITEMS_FIELD, "array", value)),
    };

    Ok(PollResult { fetched_at, items })
}

/// Resolves one work item into its name, status and verdict text
///
/// # Arguments
/// * `item` - A raw element of [`PollResult::items`]
/// * `verdicts` - Table used to look up the verdict sentence
pub fn extract(item: &JsonValue, verdicts: &VerdictTable) -> Result<WorkItemStatus> {
    let record = item
        .as_object()
        .ok_or_else(|| ValidationError::wrong_type(ITEMS_FIELD, "object", item))?;

    let name = required_string(record, NAME_FIELD)?;
    let status: StatusCode = required_string(record, STATUS_FIELD)?.parse()?;

    let verdict = verdicts
        .verdict(status)
        .ok_or_else(|| ValidationError::MissingVerdict(status.to_string()))?;

    Ok(WorkItemStatus {
        verdict_text: compose_verdict(name, verdict),
        name: name.to_string(),
        status,
    })
}

/// Builds the notification text for a status change
pub fn compose_verdict(name: &str, verdict: &str) -> String {
    format!("Изменился статус проверки работы \"{}\". {}", name, verdict)
}

fn required_string<'a>(record: &'a Map<String, JsonValue>, field: &str) -> Result<&'a str> {
    match record.get(field) {
        None | Some(JsonValue::Null) => Err(ValidationError::MissingField(field.to_string())),
        Some(JsonValue::String(s)) if s.is_empty() => {
            Err(ValidationError::MissingField(field.to_string()))
        }
        Some(JsonValue::String(s)) => Ok(s),
        Some(value) => Err(ValidationError::wrong_type(field, "string", value)),
    }
}
