// src/routes/mod.rs
pub mod chat;

use std::any::Any;
use std::path::Path;

use crate::error::AppError;
use crate::services::session::{generate_session_id, session_cookie};
use crate::state::SharedState;
use axum::{
    Router,
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use chat::chat_handler;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub fn create_router(state: SharedState) -> Router {
    let public_dir = Path::new(&state.config.public_dir);
    // Unknown paths such as `/<slug>` get the widget page.
    let widget = ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    let chat_routes = Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/chat", post(chat_handler));

    Router::new()
        .merge(guard_chat_routes(chat_routes, &state))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(widget)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

/// Panics become 500s, and every chat response leaves with a session cookie.
fn guard_chat_routes(
    routes: Router<SharedState>,
    state: &SharedState,
) -> Router<SharedState> {
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ensure_session_cookie,
        ))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Unexpected(message).into_response()
}

// The handler sets the cookie itself; this only covers responses it never
// produced, where the request body is gone and the cookie is the best source.
async fn ensure_session_cookie(
    State(state): State<SharedState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if response.headers().contains_key(SET_COOKIE) {
        return response;
    }

    let cookie_name = &state.config.session_cookie;
    let session_id = jar
        .get(cookie_name)
        .map(|c| c.value().trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_session_id);
    let jar = jar.add(session_cookie(cookie_name, &session_id));
    (jar, response).into_response()
}
