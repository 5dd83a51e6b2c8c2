//! Poll domain types

use serde_json::Value as JsonValue;

use super::status::StatusCode;

/// Validated response of one poll cycle
///
/// `items` are kept as raw JSON until the extractor looks at them. The API
/// returns them most-recent-first and only the first one matters.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResult {
    /// Server time of the response, used as the next cycle's `from_date`
    pub fetched_at: i64,
    pub items: Vec<JsonValue>,
}

impl PollResult {
    /// Most recent work item, if the API reported any
    pub fn latest(&self) -> Option<&JsonValue> {
        self.items.first()
    }
}

/// One work item with its status resolved against the verdict table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemStatus {
    pub name: String,
    pub status: StatusCode,
    pub verdict_text: String,
}
