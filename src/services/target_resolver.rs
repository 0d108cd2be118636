// src/services/target_resolver.rs
use crate::config::{ALT_URL_KEY, Config};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingTarget {
    Default,
    /// Slugs starting with the reserved prefix (`stw` unless configured otherwise).
    Alternate,
}

impl RoutingTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingTarget::Default => "default",
            RoutingTarget::Alternate => "stw",
        }
    }

    /// Name of the config key that supplies this target's template.
    pub fn config_key(&self, config: &Config) -> &'static str {
        match self {
            RoutingTarget::Default => config.default_endpoint_key,
            RoutingTarget::Alternate => ALT_URL_KEY,
        }
    }
}

pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

pub fn classify(slug: &str, alt_prefix: &str) -> RoutingTarget {
    let prefix = alt_prefix.trim().to_lowercase();
    if !prefix.is_empty() && normalize_slug(slug).starts_with(&prefix) {
        RoutingTarget::Alternate
    } else {
        RoutingTarget::Default
    }
}

/// Pick the endpoint template for `slug`, failing with the name of the
/// config key that would have supplied it.
pub fn resolve_target<'a>(
    config: &'a Config,
    slug: &str,
) -> Result<(RoutingTarget, &'a str), AppError> {
    let target = classify(slug, &config.alt_prefix);
    let template = match target {
        RoutingTarget::Default => config.default_endpoint.as_deref(),
        RoutingTarget::Alternate => config.alt_endpoint.as_deref(),
    };

    match template.map(str::trim) {
        Some(t) if !t.is_empty() => Ok((target, t)),
        _ => Err(AppError::Configuration {
            key: target.config_key(config),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match_ignores_case_and_whitespace() {
        for slug in ["stw-123", "STW_haus", "  Stw9  ", "stw"] {
            assert_eq!(classify(slug, "stw"), RoutingTarget::Alternate, "{slug}");
        }
        for slug in ["haus-12", "xstw", " s tw", ""] {
            assert_eq!(classify(slug, "stw"), RoutingTarget::Default, "{slug}");
        }
    }

    #[test]
    fn selects_template_per_class() {
        let cfg = Config::for_endpoints(Some("https://n8n/default"), Some("https://n8n/stw"));
        assert_eq!(
            resolve_target(&cfg, "stw-1").unwrap(),
            (RoutingTarget::Alternate, "https://n8n/stw")
        );
        assert_eq!(
            resolve_target(&cfg, "objekt-1").unwrap(),
            (RoutingTarget::Default, "https://n8n/default")
        );
    }

    #[test]
    fn missing_alternate_names_its_key() {
        let cfg = Config::for_endpoints(Some("https://n8n/default"), None);
        match resolve_target(&cfg, "STW-7") {
            Err(AppError::Configuration { key }) => assert_eq!(key, ALT_URL_KEY),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn blank_default_is_a_configuration_error() {
        let cfg = Config::for_endpoints(Some("   "), Some("https://n8n/stw"));
        assert!(matches!(
            resolve_target(&cfg, "haus"),
            Err(AppError::Configuration { .. })
        ));
    }
}
