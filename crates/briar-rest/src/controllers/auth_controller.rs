//! Authentication controller.
//!
//! Login exchanges credentials for a server-side session; the session ID
//! travels only in the HttpOnly `sid` cookie, never in the JSON body.

use crate::{
    extractors::CurrentUser,
    middleware::SESSION_COOKIE,
    responses::{ok, AppError, ApiResponse, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use briar_service::{LoginRequest, SessionUserResponse};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Log in with username and password.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionUserResponse>>), AppError> {
    debug!("Login request: {}", request.username);

    let outcome = state.auth.login(request).await?;
    let jar = jar.add(session_cookie(outcome.session_id));
    Ok((jar, Json(ApiResponse::success(outcome.user))))
}

/// Log out, dropping the server-side session and clearing the cookie.
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth.logout(cookie.value());
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    Ok((jar, StatusCode::NO_CONTENT))
}

/// The currently authenticated account.
async fn me(CurrentUser(session): CurrentUser) -> ApiResult<SessionUserResponse> {
    ok(SessionUserResponse {
        id: session.user_id.into_inner(),
        username: session.username,
        role: session.role,
    })
}
