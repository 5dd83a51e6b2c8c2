//! Notifier repository
//!
//! Delivers plain-text messages to a single chat through the Telegram Bot API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A message could not be delivered
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The request to the channel could not complete
    #[error("Failed to reach messaging channel: {0}")]
    Transport(#[source] reqwest::Error),

    /// The channel answered but refused the message
    #[error("Messaging channel rejected message (status {status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Repository trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a text message to the configured destination
    ///
    /// Errors must reach the caller: the poller relies on them to know a
    /// status change was not delivered.
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
}

/// Telegram implementation of Notifier
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    token: SecretString,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a new Telegram notifier
    ///
    /// # Arguments
    /// * `client` - HTTP client, normally configured with a request timeout
    /// * `api_url` - Bot API base URL (e.g., "https://api.telegram.org")
    /// * `token` - Bot token
    /// * `chat_id` - Chat that receives every message
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        token: SecretString,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            token,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_url,
            self.token.expose_secret()
        );

        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message,
        };

        // Strip the URL from transport errors, it embeds the bot token
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotificationError::Transport(e.without_url()))?;

        let reply: Option<SendMessageResponse> = serde_json::from_str(&body).ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => {
                debug!("Message delivered to chat {}", self.chat_id);
                Ok(())
            }
            Some(reply) => Err(NotificationError::Rejected {
                status: status.as_u16(),
                description: reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(NotificationError::Rejected {
                status: status.as_u16(),
                description: body,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}
