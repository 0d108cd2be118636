// src/client.rs
//! Minimal chat client: talks to the relay and never shows raw errors.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::services::session::generate_session_id;

/// Shown for any failed round-trip.
pub const APOLOGY: &str = "Sorry, something went wrong. Please try again.";
/// Shown when the relay answered successfully but without text.
pub const RECEIVED: &str = "Answer received";

#[derive(Debug, Error)]
enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay returned HTTP {status}: {error}")]
    Status { status: u16, error: String },
}

#[derive(Debug, Deserialize)]
struct RelayBody {
    response: Option<String>,
    error: Option<String>,
}

pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    slug: String,
    session_id: String,
}

impl ChatClient {
    pub fn new(base_url: &str, slug: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
            slug: slug.into(),
            session_id: generate_session_id(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send one message. Blank input is ignored and yields `None`.
    pub async fn send(&self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let reply = match self.round_trip(message).await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, "chat round-trip failed");
                APOLOGY.to_string()
            }
        };
        Some(reply)
    }

    async fn round_trip(&self, message: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({
                "message": message,
                "slug": self.slug,
                "sessionId": self.session_id,
            }))
            .send()
            .await?;

        let status = response.status();
        let body: RelayBody = response.json().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                error: body.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        Ok(body
            .response
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| RECEIVED.to_string()))
    }
}
