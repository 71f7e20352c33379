use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::models::AdminSession;
use crate::auth::session::SESSION_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Handlers taking an `AdminSession` argument are admin-only: requests
/// without a live session cookie are rejected with 401.
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::Auth("Not logged in".into()))?;

        state
            .sessions
            .validate(&token)
            .await
            .ok_or_else(|| AppError::Auth("Session expired or invalid".into()))
    }
}
