//! Session request handlers.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use gatehouse_core::models::Provider;

use crate::AppState;
use crate::cookies::{self, REMEMBER_COOKIE_NAME};
use crate::error::{AppError, AppResult};
use crate::models::{CreateSessionRequest, LogoutResponse, SessionResponse};
use crate::providers;

/// `POST /auth/sessions` — complete a login from a provider callback.
///
/// Sets the remember-me cookie iff the user opted in AND issuance
/// succeeded; an issuance failure still yields an authenticated session.
pub async fn create_session_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateSessionRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let provider = body
        .provider
        .parse::<Provider>()
        .map_err(AppError::Validation)?;
    let identity = providers::normalize_profile(provider, &body.profile)?;

    let login = state.bridge.on_authenticated(identity, body.remember).await;

    let remembered = login.remember_token.is_some();
    let jar = match &login.remember_token {
        Some(token) => jar.add(cookies::remember_cookie(
            token,
            state.config.remember_days,
            state.config.secure_cookies,
        )),
        None => jar,
    };

    Ok((
        jar,
        Json(SessionResponse {
            authenticated: true,
            principal: Some(login.principal.into()),
            remembered,
        }),
    ))
}

/// `GET /auth/sessions/current` — materialize a session from the
/// remember-me cookie.
///
/// Absent, expired, and invalid tokens all answer the same way: not
/// authenticated, no error. The caller falls through to a normal login.
pub async fn current_session_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<SessionResponse>> {
    let Some(cookie) = jar.get(REMEMBER_COOKIE_NAME) else {
        return Ok(Json(SessionResponse::anonymous()));
    };

    match state.bridge.on_cookie_presented(cookie.value()).await {
        Some(principal) => Ok(Json(SessionResponse {
            authenticated: true,
            principal: Some(principal.into()),
            remembered: true,
        })),
        None => Ok(Json(SessionResponse::anonymous())),
    }
}

/// `DELETE /auth/sessions/current` — logout.
///
/// Token deletion is best-effort; the cookie is cleared and the logout
/// succeeds regardless.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<LogoutResponse>)> {
    let token = jar.get(REMEMBER_COOKIE_NAME).map(|c| c.value().to_string());
    state.bridge.on_logout(token.as_deref()).await;

    let jar = jar.add(cookies::clear_remember_cookie());
    Ok((jar, Json(LogoutResponse { success: true })))
}
