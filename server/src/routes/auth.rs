//! Auth routes: register, login, logout, current user.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt, UserAgent};
use pillarx::activity::Origin;
use pillarx::user::User;
use pillarx::workspace::Caller;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::routes::{ApiError, ApiJson};
use crate::services::auth::{self as auth_svc, AuthError};
use crate::state::AppState;

const UNKNOWN_AGENT: &str = "Unknown";

// =============================================================================
// EXTRACTORS
// =============================================================================

/// Remote address and user-agent of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientInfo {
    #[must_use]
    pub fn origin(&self) -> Origin {
        Origin::new(self.ip_address.clone(), self.user_agent.clone())
    }

    #[must_use]
    pub fn caller(&self, user_id: Option<String>) -> Caller {
        Caller::new(user_id, self.origin())
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .typed_get::<UserAgent>()
            .map_or_else(|| UNKNOWN_AGENT.to_owned(), |ua| ua.as_str().to_owned());
        let ip_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get("x-forwarded-for")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .map(|v| v.trim().to_owned())
            })
            .unwrap_or_else(|| "unknown".to_owned());
        Ok(Self { ip_address, user_agent })
    }
}

/// Authenticated caller from a bearer token whose session is still open.
/// Use as a handler parameter to require authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub session_id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() else {
            return Err(ApiError::unauthorized("Access denied. No token provided."));
        };
        let app_state = AppState::from_ref(state);
        authenticate(&app_state, bearer.token()).await
    }
}

/// Validate a raw bearer token against the signer and the session table.
///
/// # Errors
///
/// 401 "Invalid or expired token." for any bad signature, expiry, or closed
/// or expired session.
pub async fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let invalid = || ApiError::unauthorized("Invalid or expired token.");
    let now = OffsetDateTime::now_utc();
    let claims = state.tokens.verify(token, now).map_err(|_| invalid())?;
    let sessions = state.sessions.read().await;
    match sessions.get(&claims.sid) {
        Some(session) if session.user_id == claims.sub && !session.is_expired(now) => {}
        _ => return Err(invalid()),
    }
    Ok(AuthUser { user_id: claims.sub, email: claims.email, session_id: claims.sid })
}

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingCredentials | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn auth_error(err: AuthError) -> ApiError {
    if let AuthError::Hash(detail) = &err {
        tracing::error!(error = %detail, "password hashing failed");
    }
    ApiError::new(auth_error_to_status(&err), err.to_string())
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

/// `POST /api/auth/register`: create an account.
pub async fn register(
    State(state): State<AppState>,
    client: ClientInfo,
    ApiJson(body): ApiJson<RegisterBody>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let mut workspace = state.workspace.write().await;
    let user = auth_svc::register(
        &mut workspace,
        body.email.as_deref().unwrap_or_default(),
        body.password.as_deref().unwrap_or_default(),
        body.full_name,
        &client.caller(None),
    )
    .map_err(auth_error)?;
    state.persist(&workspace);
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub email: String,
    pub full_name: Option<String>,
    pub is_bot: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// `POST /api/auth/login`: check credentials and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let mut workspace = state.workspace.write().await;
    let mut sessions = state.sessions.write().await;
    let outcome = auth_svc::login(
        &mut workspace,
        &mut sessions,
        &state.tokens,
        body.email.as_deref().unwrap_or_default(),
        body.password.as_deref().unwrap_or_default(),
        &client.caller(None),
    )
    .map_err(auth_error)?;
    state.persist(&workspace);
    Ok(Json(LoginResponse {
        token: outcome.token,
        user: LoginUser { email: outcome.user.email, full_name: outcome.user.full_name, is_bot: outcome.is_bot },
    }))
}

/// `POST /api/auth/logout`: close the session and record `LOGOUT`.
pub async fn logout(State(state): State<AppState>, auth: AuthUser, client: ClientInfo) -> Json<serde_json::Value> {
    state.sessions.write().await.delete(&auth.session_id);
    let mut workspace = state.workspace.write().await;
    workspace.sign_out(&client.caller(Some(auth.user_id.clone())));
    state.persist(&workspace);
    info!(user_id = %auth.user_id, "user logged out");
    Json(serde_json::json!({ "message": "Successfully logged out." }))
}

/// `GET /api/me`: the caller's profile.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, ApiError> {
    let workspace = state.workspace.read().await;
    workspace.user(&auth.user_id).cloned().map(Json).ok_or_else(|| ApiError::not_found("User not found."))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
