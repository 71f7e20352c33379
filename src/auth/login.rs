use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::models::AdminSession;
use crate::auth::session::SESSION_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub session: AdminSession,
}

/// `POST /api/auth/login`: Admin login handler.
///
/// Checks the credentials against the configured admin account and, on
/// success, sets the `spolder_session` cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    if !state.credentials.verify(&req.username, &req.password) {
        tracing::warn!(username = %req.username, "Rejected admin login");
        return Err(AppError::Auth("Invalid username or password".into()));
    }

    let session = state.sessions.issue(&req.username).await;
    let max_age = time::Duration::minutes(state.sessions.ttl().num_minutes());

    let cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build();

    tracing::info!(username = %session.username, "Admin logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".to_string(),
            session,
        }),
    ))
}

/// `GET /api/auth/me`: The current admin session.
pub async fn me_handler(session: AdminSession) -> Json<AdminSession> {
    Json(session)
}

/// `POST /api/auth/logout`: Revokes the session and clears the cookie.
pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> CookieJar {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.sessions.revoke(cookie.value()).await {
            tracing::info!("Admin logged out");
        }
    }

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .removal()
        .build();

    jar.remove(cookie)
}
