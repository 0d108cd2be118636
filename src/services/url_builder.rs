// src/services/url_builder.rs

pub const SLUG_PLACEHOLDER: &str = "{slug}";

/// Turn an endpoint template into the concrete webhook URL for `slug`.
///
/// Templates containing `{slug}` get the encoded slug substituted in place;
/// anything else is treated as a base URL and the slug becomes the last path
/// segment. Returns `None` for a blank template.
pub fn build_webhook_url(template: &str, slug: &str) -> Option<String> {
    let template = template.trim();
    if template.is_empty() {
        return None;
    }

    let encoded = urlencoding::encode(slug.trim());
    if template.contains(SLUG_PLACEHOLDER) {
        return Some(template.replace(SLUG_PLACEHOLDER, &encoded));
    }

    let base = template.trim_end_matches('/');
    Some(format!("{base}/{encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_does_not_matter() {
        let a = build_webhook_url("https://n8n.example/webhook/makler-chat", "haus-1");
        let b = build_webhook_url("https://n8n.example/webhook/makler-chat/", "haus-1");
        assert_eq!(a, b);
        assert_eq!(a.as_deref(), Some("https://n8n.example/webhook/makler-chat/haus-1"));
    }

    #[test]
    fn placeholder_is_substituted() {
        let url = build_webhook_url("https://n8n.example/webhook/{slug}/chat", "stw 4");
        assert_eq!(url.as_deref(), Some("https://n8n.example/webhook/stw%204/chat"));
    }

    #[test]
    fn slug_is_percent_encoded() {
        let url = build_webhook_url("https://h/w", "a/b?c").unwrap();
        assert_eq!(url, "https://h/w/a%2Fb%3Fc");
    }

    #[test]
    fn blank_template_is_rejected() {
        assert_eq!(build_webhook_url("  ", "slug"), None);
    }
}
