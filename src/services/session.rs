// src/services/session.rs
//! Session ids are opaque correlation tokens; nothing is stored server side.

use axum_extra::extract::cookie::{Cookie, SameSite};
use uuid::Uuid;

pub const SESSION_PREFIX: &str = "sess_";

/// Fresh id backed by the OS random source (uuid v4).
pub fn generate_session_id() -> String {
    format!("{SESSION_PREFIX}{}", Uuid::new_v4().simple())
}

/// HttpOnly, SameSite=Lax cookie echoing the session id back to the browser.
pub fn session_cookie(name: &str, session_id: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), session_id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed_and_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert!(a.starts_with(SESSION_PREFIX));
        assert_eq!(a.len(), SESSION_PREFIX.len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn cookie_flags() {
        let cookie = session_cookie("chat_session_id", "sess_1");
        assert_eq!(cookie.value(), "sess_1");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }
}
