//! Error types for the Verdict client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when polling the status API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not complete (connection, DNS, timeout)
    #[error("Status API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API answered with something other than 200 OK
    ///
    /// The body is kept for logging but left out of the message: error pages
    /// carry request ids and can be arbitrarily long.
    #[error("Status API unavailable (status {status})")]
    ServiceUnavailable {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// Body decoded but carries an error indicator instead of the expected schema
    #[error("Status API returned an error payload ({key}: {value})")]
    MalformedPayload {
        /// Indicator key that was present ("error" or "code")
        key: &'static str,
        /// Value of the indicator, rendered as JSON
        value: String,
    },

    /// Body is not a JSON document
    #[error("Failed to decode status API response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Create a service-unavailable error from status code and body
    pub fn service_unavailable(status: u16, body: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            status,
            body: body.into(),
        }
    }

    /// Check if this error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { status, .. } if *status >= 500)
    }

    /// Check if the API reported an error inside a 200 response
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }
}
