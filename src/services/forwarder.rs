// src/services/forwarder.rs
use reqwest::header::AUTHORIZATION;

use crate::error::AppError;
use crate::message::OutboundMessage;

/// Posts chat messages to the workflow webhook. One attempt per message.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl std::fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("token_configured", &self.token.is_some())
            .finish()
    }
}

impl WebhookClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), token)
    }

    pub fn with_client(http: reqwest::Client, token: Option<String>) -> Self {
        Self { http, token }
    }

    /// Returns the raw upstream body on a 2xx with content.
    pub async fn forward(
        &self,
        url: &str,
        payload: &OutboundMessage<'_>,
    ) -> Result<String, AppError> {
        let mut request = self.http.post(url).json(payload);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::UpstreamTransport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                AppError::UpstreamTransport(format!("failed to read upstream body: {e}"))
            })?;

        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Err(AppError::UpstreamEmpty);
        }

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "webhook answered");
        Ok(body)
    }
}
