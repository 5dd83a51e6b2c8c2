//! Status domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Review status reported by the status API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCode {
    Approved,
    Reviewing,
    Rejected,
}

impl StatusCode {
    /// All known status codes, in the order the API documents them
    pub const ALL: [StatusCode; 3] = [
        StatusCode::Approved,
        StatusCode::Reviewing,
        StatusCode::Rejected,
    ];

    /// Wire representation of the status code
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Approved => "approved",
            StatusCode::Reviewing => "reviewing",
            StatusCode::Rejected => "rejected",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// Verdict sentences shipped with the bot
const STANDARD_VERDICTS: [(StatusCode, &str); 3] = [
    (
        StatusCode::Approved,
        "Работа проверена: ревьюеру всё понравилось. Ура!",
    ),
    (StatusCode::Reviewing, "Работа взята на проверку ревьюером."),
    (
        StatusCode::Rejected,
        "Работа проверена: у ревьюера есть замечания.",
    ),
];

/// Mapping from status code to the human-readable verdict sentence
///
/// The table is data, not logic: callers can start from [`VerdictTable::standard`]
/// and override individual entries, or build an empty table and fill it in.
/// A status with no entry is reported as an error by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictTable {
    verdicts: HashMap<StatusCode, String>,
}

impl VerdictTable {
    /// Creates a table with no verdicts
    pub fn empty() -> Self {
        Self {
            verdicts: HashMap::new(),
        }
    }

    /// Creates the table with the standard verdict sentences
    pub fn standard() -> Self {
        STANDARD_VERDICTS
            .into_iter()
            .fold(Self::empty(), |table, (code, text)| {
                table.with_verdict(code, text)
            })
    }

    /// Sets the verdict for a status code, replacing any previous one
    pub fn with_verdict(mut self, code: StatusCode, text: impl Into<String>) -> Self {
        self.verdicts.insert(code, text.into());
        self
    }

    /// Returns the verdict sentence for a status code, if one is configured
    pub fn verdict(&self, code: StatusCode) -> Option<&str> {
        self.verdicts.get(&code).map(String::as_str)
    }
}

impl Default for VerdictTable {
    fn default() -> Self {
        Self::standard()
    }
}
