//! Homework status endpoint

use crate::StatusClient;
use crate::error::Result;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

#[derive(Debug, Serialize)]
struct StatusQuery {
    from_date: i64,
}

impl StatusClient {
    // =============================================================================
    // Status Query
    // =============================================================================

    /// Fetch homework statuses changed since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Lower bound of the reporting window, unix seconds
    ///
    /// # Returns
    /// The decoded response body, not yet validated
    pub async fn fetch_statuses(&self, from_date: i64) -> Result<JsonValue> {
        debug!("Requesting statuses from {} (from_date={})", self.endpoint, from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("OAuth {}", self.token.expose_secret()),
            )
            .query(&StatusQuery { from_date })
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientError, StatusClient};
    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use serde_json::{Value as JsonValue, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct StubState {
        status: StatusCode,
        body: String,
        seen: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
    }

    async fn statuses(
        State(state): State<StubState>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> Response {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        state
            .seen
            .lock()
            .unwrap()
            .push((auth, query.get("from_date").cloned()));

        (
            state.status,
            [("content-type", "application/json")],
            state.body.clone(),
        )
            .into_response()
    }

    async fn spawn_stub(status: StatusCode, body: &str) -> (String, StubState) {
        let state = StubState {
            status,
            body: body.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/statuses/", get(statuses))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/statuses/", addr), state)
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_window() {
        let body = json!({"homeworks": [], "current_date": 1700000000});
        let (endpoint, state) = spawn_stub(StatusCode::OK, &body.to_string()).await;

        let client = StatusClient::new(endpoint, "abc123");
        let result = client.fetch_statuses(1699913600).await.unwrap();

        assert_eq!(result, body);
        let seen = state.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("OAuth abc123"));
        assert_eq!(seen[0].1.as_deref(), Some("1699913600"));
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status_is_unavailable() {
        let (endpoint, _) = spawn_stub(StatusCode::SERVICE_UNAVAILABLE, "down").await;

        let client = StatusClient::new(endpoint, "abc123");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(err.is_server_error());
        assert!(matches!(
            err,
            ClientError::ServiceUnavailable { status: 503, ref body } if body == "down"
        ));
    }

    #[tokio::test]
    async fn test_fetch_other_success_codes_are_unavailable() {
        let (endpoint, _) = spawn_stub(StatusCode::NO_CONTENT, "").await;

        let client = StatusClient::new(endpoint, "abc123");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(matches!(err, ClientError::ServiceUnavailable { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_fetch_error_payload_is_malformed() {
        let (endpoint, _) = spawn_stub(StatusCode::OK, r#"{"error": "bad_token"}"#).await;

        let client = StatusClient::new(endpoint, "abc123");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(err.is_malformed_payload());
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_is_decode_error() {
        let (endpoint, _) = spawn_stub(StatusCode::OK, "<html>").await;

        let client = StatusClient::new(endpoint, "abc123");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = StatusClient::new(format!("http://{}/statuses/", addr), "abc123");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_fetch_returns_raw_body_without_inspecting_items() -> anyhow::Result<()> {
        let body = json!({"homeworks": [{"unexpected": true}], "current_date": 3});
        let (endpoint, _) = spawn_stub(StatusCode::OK, &body.to_string()).await;

        let client = StatusClient::new(endpoint, "abc123");
        let result: JsonValue = client.fetch_statuses(0).await?;

        assert_eq!(result["homeworks"][0]["unexpected"], json!(true));
        Ok(())
    }
}
