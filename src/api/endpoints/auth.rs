//! Account endpoints — registration (gated by the admin key), login,
//! logout.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth::{self, SignupRequest};

#[derive(Serialize)]
pub struct SignupResponse {
    pub user_id: String,
}

/// `POST /api/auth/signup` — register a staff account.
///
/// Creates the login account and the matching employee record.
pub async fn signup(
    State(ctx): State<ApiContext>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let key = ctx.core.settings.registration_key.as_deref();
    let user = auth::signup(&conn, key, &payload)?;

    Ok(Json(SignupResponse {
        user_id: user.id.to_string(),
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
}

/// `POST /api/auth/login` — verify credentials and issue a session token.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let user = auth::login(&conn, &payload.email, &payload.password)?;

    let token = {
        let mut sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock".into()))?;
        sessions.issue(user.id, &user.name)
    };

    tracing::info!(user_id = %user.id, "Staff logged in");
    Ok(Json(LoginResponse {
        token,
        name: user.name,
    }))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

/// `POST /api/auth/logout` — revoke the presented session token.
pub async fn logout(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let mut sessions = ctx
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("session lock".into()))?;
    sessions.revoke(token);

    Ok(Json(LogoutResponse { logged_out: true }))
}
