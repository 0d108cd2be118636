// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Client sent a request without a resolvable message and/or slug.
    #[error("{}", missing_text(.missing))]
    Validation { missing: Vec<&'static str> },

    #[error("invalid request body")]
    InvalidBody(String),

    /// Operator forgot to configure an endpoint. Carries the key name only.
    #[error("server configuration missing: {key}")]
    Configuration { key: &'static str },

    #[error("upstream webhook returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream webhook accepted the request but returned an empty response")]
    UpstreamEmpty,

    #[error("upstream webhook unreachable")]
    UpstreamTransport(String),

    #[error("unexpected error while handling chat message")]
    Unexpected(String),
}

fn missing_text(missing: &[&'static str]) -> String {
    match missing {
        [] => "invalid request".to_string(),
        [one] => format!("{one} is missing"),
        many => format!("{} are missing", many.join(" and ")),
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<&'static str>>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration { .. }
            | AppError::UpstreamStatus { .. }
            | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamEmpty | AppError::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            AppError::InvalidBody(d)
            | AppError::UpstreamTransport(d)
            | AppError::Unexpected(d) => Some(d.clone()),
            AppError::UpstreamStatus { status, body } => Some(format!("status {status}: {body}")),
            AppError::Configuration { key } => Some(format!("{key} is not set")),
            AppError::Validation { .. } | AppError::UpstreamEmpty => None,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            details: self.details(),
            missing: match self {
                AppError::Validation { missing } => Some(missing.clone()),
                _ => None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!(%status, error = %self, "rejected chat request");
        } else {
            tracing::error!(
                %status,
                error = %self,
                details = ?self.details(),
                "chat request failed"
            );
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_lists_every_missing_field() {
        let err = AppError::Validation {
            missing: vec!["message", "slug"],
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.body();
        assert_eq!(body.error, "message and slug are missing");
        assert_eq!(body.missing, Some(vec!["message", "slug"]));
    }

    #[test]
    fn upstream_status_carries_code_and_body() {
        let err = AppError::UpstreamStatus {
            status: 503,
            body: "down".into(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().details.as_deref(), Some("status 503: down"));
    }

    #[test]
    fn empty_upstream_is_distinct() {
        let err = AppError::UpstreamEmpty;
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("empty"));
    }
}
