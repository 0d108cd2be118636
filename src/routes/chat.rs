use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::REFERER},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest, OutboundMessage},
    services::{
        extraction::{Resolved, resolve_required, resolve_session_id},
        normalizer::normalize_reply,
        session::session_cookie,
        target_resolver::resolve_target,
        url_builder::build_webhook_url,
    },
    state::SharedState,
};

fn parse_body(body: &[u8]) -> Result<ChatRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChatRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}

/// `POST /api/chat`. The session cookie is set whatever the outcome.
pub async fn chat_handler(
    State(state): State<SharedState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Bytes,
) -> (CookieJar, Response) {
    let cookie_name = &state.config.session_cookie;
    let request = parse_body(&body);

    let fallback = ChatRequest::default();
    let session_id = resolve_session_id(
        request.as_ref().unwrap_or(&fallback),
        jar.get(cookie_name).map(|c| c.value()),
    );

    let result = match request {
        Ok(request) => relay(&state, &request, &headers, &session_id).await,
        Err(e) => Err(e),
    };

    let response = match result {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => e.into_response(),
    };
    let jar = jar.add(session_cookie(cookie_name, &session_id));
    (jar, response)
}

async fn relay(
    state: &SharedState,
    request: &ChatRequest,
    headers: &HeaderMap,
    session_id: &str,
) -> Result<ChatReply, AppError> {
    let config = &state.config;
    let referer = headers.get(REFERER).and_then(|v| v.to_str().ok());

    let Resolved { message, slug } = resolve_required(request, referer, &config.slug_order)?;

    let (target, template) = resolve_target(config, &slug)?;
    let url = build_webhook_url(template, &slug).ok_or(AppError::Configuration {
        key: target.config_key(config),
    })?;

    tracing::info!(%slug, target = target.as_str(), %session_id, "forwarding chat message");

    let outbound = OutboundMessage {
        message: &message,
        slug: &slug,
        session_id,
        path: request.path_str(),
        metadata: request.metadata.as_ref(),
    };
    let raw = state.webhook.forward(&url, &outbound).await?;

    Ok(ChatReply {
        response: normalize_reply(&raw),
        session_id: session_id.to_string(),
    })
}
