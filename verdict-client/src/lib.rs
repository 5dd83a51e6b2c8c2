//! Verdict HTTP Client
//!
//! A small HTTP client for the homework status API.
//!
//! The client performs exactly one request per call and never retries: the
//! bot's poll loop owns scheduling and failure handling. Responses are returned
//! as raw JSON so that shape validation stays in `verdict-core`.
//!
//! # Example
//!
//! ```no_run
//! use verdict_client::StatusClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = StatusClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "my-oauth-token",
//!     );
//!
//!     let body = client.fetch_statuses(0).await?;
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```

pub mod error;
mod statuses;

pub use error::{ClientError, Result};

use reqwest::Client;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::Value as JsonValue;
use tracing::error;

/// Keys whose presence in a 200 response means the API reported an error
const ERROR_INDICATOR_KEYS: [&str; 2] = ["error", "code"];

/// HTTP client for the homework status API
#[derive(Debug)]
pub struct StatusClient {
    /// Full URL of the status endpoint
    endpoint: String,
    /// OAuth token sent in the `Authorization` header
    token: SecretString,
    /// HTTP client instance
    client: Client,
}

impl StatusClient {
    /// Create a new status client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the status endpoint
    /// * `token` - OAuth token for the API
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, SecretString::from(token.into()), Client::new())
    }

    /// Create a new status client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use verdict_client::StatusClient;
    /// use reqwest::Client;
    /// use secrecy::SecretString;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = StatusClient::with_client(
    ///     "http://localhost:8080/statuses/",
    ///     SecretString::from("token".to_string()),
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(endpoint: impl Into<String>, token: SecretString, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            token,
            client,
        }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and decode the JSON body
    ///
    /// Anything but 200 OK is reported as unavailable. A decoded object that
    /// carries an `error` or `code` key is reported as a malformed payload;
    /// both keys are checked.
    async fn handle_response(&self, response: reqwest::Response) -> Result<JsonValue> {
        let status = response.status();

        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                "Status API answered {} from {}: {}",
                status, self.endpoint, error_text
            );
            return Err(ClientError::service_unavailable(status.as_u16(), error_text));
        }

        let bytes = response.bytes().await?;
        let body: JsonValue = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        check_error_indicators(&body)?;

        Ok(body)
    }
}

/// Rejects bodies that carry an error indicator instead of the expected schema
fn check_error_indicators(body: &JsonValue) -> Result<()> {
    let Some(object) = body.as_object() else {
        return Ok(());
    };

    for key in ERROR_INDICATOR_KEYS {
        if let Some(value) = object.get(key) {
            return Err(ClientError::MalformedPayload {
                key,
                value: value.to_string(),
            });
        }
    }

    Ok(())
}
