//! Account registration and password login.
//!
//! ERROR HANDLING
//! ==============
//! [`AuthError`] messages are the exact strings returned to clients, so a
//! bad email and a bad password are indistinguishable.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pillarx::activity::action;
use pillarx::user::{Account, Role, User};
use pillarx::workspace::{Caller, Workspace};
use rand::Rng;
use serde_json::json;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::services::session::SessionStore;
use crate::services::token::TokenSigner;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required.")]
    MissingCredentials,
    #[error("Email already registered.")]
    EmailTaken,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Argon2id PHC string for `password` under a fresh random salt.
///
/// # Errors
///
/// [`AuthError::Hash`] if the hasher rejects its inputs.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// False for a wrong password and for an unparsable stored hash.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .is_ok_and(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Create an account. Returns the public profile.
///
/// # Errors
///
/// [`AuthError::MissingCredentials`] for a blank email or password and
/// [`AuthError::EmailTaken`] when the email already has an account.
pub fn register(
    workspace: &mut Workspace,
    email: &str,
    password: &str,
    full_name: Option<String>,
    caller: &Caller,
) -> Result<User, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if workspace.account_by_email(email).is_some() {
        return Err(AuthError::EmailTaken);
    }
    let user = User {
        id: format!("u_{}", Uuid::new_v4().simple()),
        email: email.to_owned(),
        full_name,
        role: Role::User,
        is_bot: false,
        created_at: OffsetDateTime::now_utc(),
    };
    let account = Account { user: user.clone(), password_hash: hash_password(password)? };
    if !workspace.add_account(account) {
        return Err(AuthError::EmailTaken);
    }
    let caller = Caller::new(Some(user.id.clone()), caller.origin.clone());
    workspace.record(&caller, action::REGISTER, None);
    Ok(user)
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
    pub is_bot: bool,
}

/// Check credentials, open a session, sign a token, and record `LOGIN`.
///
/// # Errors
///
/// [`AuthError::InvalidCredentials`] for an unknown email or wrong password.
pub fn login(
    workspace: &mut Workspace,
    sessions: &mut SessionStore,
    signer: &TokenSigner,
    email: &str,
    password: &str,
    caller: &Caller,
) -> Result<LoginOutcome, AuthError> {
    let account = workspace.account_by_email(email.trim()).ok_or(AuthError::InvalidCredentials)?;
    if !verify_password(password, &account.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }
    let user = account.user.clone();

    let session = sessions.create(&user.id, &caller.origin);
    let token = signer.issue(&user.id, &user.email, &session.id, session.created_at);
    let is_bot = session.actor_type.is_bot();

    let caller = Caller::new(Some(user.id.clone()), caller.origin.clone());
    workspace.record(&caller, action::LOGIN, Some(json!({ "client": session.actor_type, "platform": "Web" })));
    workspace.set_current_user(Some(user.clone()));
    info!(user_id = %user.id, actor = ?session.actor_type, open_sessions = sessions.len(), "user logged in");

    Ok(LoginOutcome { token, user, is_bot })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
