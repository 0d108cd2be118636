// src/services/extraction.rs
//! Pulls message, slug and session id out of whatever body shape the widget sent.

use crate::config::SlugSource;
use crate::error::AppError;
use crate::message::ChatRequest;
use crate::services::session::generate_session_id;
use serde_json::Value;

type Accessor = fn(&ChatRequest) -> Option<&Value>;

fn field_message(r: &ChatRequest) -> Option<&Value> {
    r.message.as_ref()
}

fn field_input(r: &ChatRequest) -> Option<&Value> {
    r.input.as_ref()
}

fn field_text(r: &ChatRequest) -> Option<&Value> {
    r.text.as_ref()
}

fn field_slug(r: &ChatRequest) -> Option<&Value> {
    r.slug.as_ref()
}

fn field_property_id(r: &ChatRequest) -> Option<&Value> {
    r.property_id.as_ref()
}

// `Value::get` yields nothing for a non-object `metadata`.
fn metadata_slug(r: &ChatRequest) -> Option<&Value> {
    r.metadata.as_ref()?.get("slug")
}

fn metadata_property_id(r: &ChatRequest) -> Option<&Value> {
    r.metadata.as_ref()?.get("propertyId")
}

const MESSAGE_FIELDS: &[Accessor] = &[field_message, field_input, field_text];
const BODY_SLUG_FIELDS: &[Accessor] = &[field_slug, field_property_id];
const METADATA_SLUG_FIELDS: &[Accessor] = &[metadata_slug, metadata_property_id];

/// Trimmed text of a string or number value; anything else is unusable.
fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(text).filter(|t| !t.is_empty())
}

fn first_non_empty(req: &ChatRequest, accessors: &[Accessor]) -> Option<String> {
    accessors
        .iter()
        .filter_map(|get| get(req))
        .find_map(value_text)
}

/// First path segment, ignoring any query string or fragment.
pub fn first_path_segment(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segment = path.split('/').map(str::trim).find(|s| !s.is_empty())?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}

fn slug_from_referer(referer: &str) -> Option<String> {
    match url::Url::parse(referer) {
        Ok(url) => first_path_segment(url.path()),
        // Relative referers are rare, but treat them as bare paths.
        Err(_) => first_path_segment(referer),
    }
}

pub fn resolve_message(req: &ChatRequest) -> Option<String> {
    first_non_empty(req, MESSAGE_FIELDS)
}

pub fn resolve_slug(
    req: &ChatRequest,
    referer: Option<&str>,
    order: &[SlugSource],
) -> Option<(String, SlugSource)> {
    order.iter().find_map(|source| {
        let found = match source {
            SlugSource::Body => first_non_empty(req, BODY_SLUG_FIELDS),
            SlugSource::Metadata => first_non_empty(req, METADATA_SLUG_FIELDS),
            SlugSource::Path => req.path_str().and_then(first_path_segment),
            SlugSource::Referer => referer.and_then(slug_from_referer),
        };
        found.map(|slug| (slug, *source))
    })
}

/// Body value, then cookie, then a fresh id.
pub fn resolve_session_id(req: &ChatRequest, cookie: Option<&str>) -> String {
    req.session_id
        .as_ref()
        .and_then(value_text)
        .or_else(|| {
            cookie
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(generate_session_id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub message: String,
    pub slug: String,
}

pub fn resolve_required(
    req: &ChatRequest,
    referer: Option<&str>,
    order: &[SlugSource],
) -> Result<Resolved, AppError> {
    let message = resolve_message(req);
    let slug = resolve_slug(req, referer, order);

    match (message, slug) {
        (Some(message), Some((slug, source))) => {
            tracing::debug!(%slug, ?source, "resolved slug");
            Ok(Resolved { message, slug })
        }
        (message, slug) => {
            let mut missing = Vec::new();
            if message.is_none() {
                missing.push("message");
            }
            if slug.is_none() {
                missing.push("slug");
            }
            Err(AppError::Validation { missing })
        }
    }
}
