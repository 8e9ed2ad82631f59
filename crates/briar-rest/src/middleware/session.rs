//! Session resolution middleware.

use crate::state::AppState;
use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

/// Cookie carrying the session ID.
pub const SESSION_COOKIE: &str = "sid";

/// Resolves the `sid` cookie to a live session and inserts it into request
/// extensions. Requests without a valid session pass through untouched;
/// the extractors decide which routes require one.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(session) = state.auth.current(cookie.value()) {
            request.extensions_mut().insert(session);
        }
    }
    next.run(request).await
}
