//! Statuses repository
//!
//! Fetches raw homework statuses from the status API.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use verdict_client::{ClientError, StatusClient};

/// Repository trait for reading work item statuses
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Fetches statuses reported since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Lower bound of the reporting window, unix seconds
    ///
    /// # Returns
    /// The raw response body; shape checks are the caller's job
    async fn fetch(&self, from_date: i64) -> Result<JsonValue, ClientError>;
}

/// HTTP implementation of StatusRepository
pub struct HttpStatusRepository {
    client: StatusClient,
}

impl HttpStatusRepository {
    /// Creates a new HTTP status repository
    pub fn new(client: StatusClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusRepository for HttpStatusRepository {
    async fn fetch(&self, from_date: i64) -> Result<JsonValue, ClientError> {
        self.client.fetch_statuses(from_date).await
    }
}
