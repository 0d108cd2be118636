// src/config.rs
use std::{env, fmt, str::FromStr};

use anyhow::{Context, bail};

pub const DEFAULT_URL_KEY: &str = "N8N_WEBHOOK_URL_DEFAULT";
pub const ALT_URL_KEY: &str = "N8N_WEBHOOK_URL_STW";
pub const LEGACY_URL_KEY: &str = "N8N_WEBHOOK_URL";
pub const TOKEN_KEY: &str = "N8N_WEBHOOK_TOKEN";

/// Where a slug may be recovered from when the body does not carry one directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugSource {
    /// `slug` / `propertyId` body fields.
    Body,
    /// `metadata.slug` / `metadata.propertyId`.
    Metadata,
    /// First segment of the `path` body field.
    Path,
    /// First segment of the `Referer` header's path.
    Referer,
}

impl FromStr for SlugSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(SlugSource::Body),
            "metadata" => Ok(SlugSource::Metadata),
            "path" => Ok(SlugSource::Path),
            "referer" | "referrer" => Ok(SlugSource::Referer),
            other => Err(format!("unknown slug source '{other}'")),
        }
    }
}

pub const DEFAULT_SLUG_ORDER: [SlugSource; 4] = [
    SlugSource::Body,
    SlugSource::Metadata,
    SlugSource::Path,
    SlugSource::Referer,
];

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// Endpoint template for ordinary slugs, with the key it was read from.
    pub default_endpoint: Option<String>,
    pub default_endpoint_key: &'static str,
    /// Endpoint template for slugs carrying the reserved prefix.
    pub alt_endpoint: Option<String>,
    pub alt_prefix: String,
    pub token: Option<String>,

    pub slug_order: Vec<SlugSource>,
    pub session_cookie: String,
    pub public_dir: String,
}

// Token is deliberately left out.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("default_endpoint", &self.default_endpoint)
            .field("default_endpoint_key", &self.default_endpoint_key)
            .field("alt_endpoint", &self.alt_endpoint)
            .field("alt_prefix", &self.alt_prefix)
            .field("token_configured", &self.token.is_some())
            .field("slug_order", &self.slug_order)
            .field("session_cookie", &self.session_cookie)
            .field("public_dir", &self.public_dir)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (default_endpoint, default_endpoint_key) = match get(DEFAULT_URL_KEY) {
            Some(url) => (Some(url), DEFAULT_URL_KEY),
            None => match get(LEGACY_URL_KEY) {
                Some(url) => (Some(url), LEGACY_URL_KEY),
                None => (None, DEFAULT_URL_KEY),
            },
        };
        let alt_endpoint = get(ALT_URL_KEY);

        if default_endpoint.is_none() && alt_endpoint.is_none() {
            bail!(
                "no webhook endpoint configured: \
                 set {DEFAULT_URL_KEY}, {ALT_URL_KEY} or {LEGACY_URL_KEY}"
            );
        }

        let slug_order = match get("SLUG_FALLBACK_ORDER") {
            Some(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(SlugSource::from_str)
                .collect::<Result<Vec<_>, _>>()
                .map_err(anyhow::Error::msg)
                .context("invalid SLUG_FALLBACK_ORDER")?,
            None => DEFAULT_SLUG_ORDER.to_vec(),
        };

        Ok(Config {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("invalid PORT")?,
            default_endpoint,
            default_endpoint_key,
            alt_endpoint,
            alt_prefix: get("ALT_SLUG_PREFIX")
                .map(|p| p.to_lowercase())
                .unwrap_or_else(|| "stw".to_string()),
            token: get(TOKEN_KEY),
            slug_order,
            session_cookie: get("SESSION_COOKIE_NAME")
                .unwrap_or_else(|| "chat_session_id".to_string()),
            public_dir: get("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()),
        })
    }

    /// Config with explicit endpoints and defaults for everything else.
    pub fn for_endpoints(default_endpoint: Option<&str>, alt_endpoint: Option<&str>) -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            default_endpoint: default_endpoint.map(str::to_string),
            default_endpoint_key: DEFAULT_URL_KEY,
            alt_endpoint: alt_endpoint.map(str::to_string),
            alt_prefix: "stw".to_string(),
            token: None,
            slug_order: DEFAULT_SLUG_ORDER.to_vec(),
            session_cookie: "chat_session_id".to_string(),
            public_dir: "public".to_string(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
