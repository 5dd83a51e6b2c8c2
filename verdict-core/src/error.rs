//! Error types for response validation

use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while checking the shape of a status API response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A value had the wrong JSON type
    #[error("Field '{field}' has wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Field name, or "response" for the top-level value
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A required field is absent, null or empty
    #[error("Missing required field '{0}'")]
    MissingField(String),

    /// The status is not part of the known enumeration
    #[error("Unknown status '{0}'")]
    UnknownStatus(String),

    /// The status is known but the verdict table has no sentence for it
    #[error("No verdict configured for status '{0}'")]
    MissingVerdict(String),
}

impl ValidationError {
    /// Create a wrong-type error for a field
    pub fn wrong_type(
        field: impl Into<String>,
        expected: &'static str,
        actual: &serde_json::Value,
    ) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            actual: json_type_name(actual),
        }
    }

    /// Check if this error means the API changed its status enumeration
    pub fn is_contract_change(&self) -> bool {
        matches!(self, Self::UnknownStatus(_))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
