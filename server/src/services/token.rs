//! Signed bearer tokens.
//!
//! DESIGN
//! ======
//! A token is `hex(claims_json) "." hex(hmac_sha256(claims_json))`. Claims
//! carry the user id, email, session id, and an absolute expiry in unix
//! seconds. Verification checks the signature before decoding anything, then
//! the expiry against the caller-supplied clock.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::OffsetDateTime;

use crate::services::session::{bytes_to_hex, hex_to_bytes};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub sid: String,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid signing key")]
    Key,
}

#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").field("ttl_secs", &self.ttl_secs).finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// # Errors
    ///
    /// [`TokenError::Key`] if the HMAC cannot be keyed with `secret`.
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, TokenError> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| TokenError::Key)?;
        Ok(Self { mac, ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX) })
    }

    /// Token lifetime, also used as the session lifetime.
    #[must_use]
    pub fn ttl(&self) -> time::Duration {
        time::Duration::seconds(self.ttl_secs)
    }

    fn signature(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    /// Issue a token for a session, expiring `ttl_secs` after `now`.
    #[must_use]
    pub fn issue(&self, user_id: &str, email: &str, session_id: &str, now: OffsetDateTime) -> String {
        let claims = Claims {
            sub: user_id.to_owned(),
            email: email.to_owned(),
            sid: session_id.to_owned(),
            exp: now.unix_timestamp().saturating_add(self.ttl_secs),
        };
        // Serializing a struct of strings and an integer cannot fail.
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        format!("{}.{}", bytes_to_hex(&payload), bytes_to_hex(&self.signature(&payload)))
    }

    /// # Errors
    ///
    /// [`TokenError::Malformed`] for anything that is not two hex segments of
    /// valid claims, [`TokenError::BadSignature`] on a signature mismatch, and
    /// [`TokenError::Expired`] once `now` reaches the expiry.
    pub fn verify(&self, token: &str, now: OffsetDateTime) -> Result<Claims, TokenError> {
        let (payload_hex, sig_hex) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = hex_to_bytes(payload_hex).ok_or(TokenError::Malformed)?;
        let sig = hex_to_bytes(sig_hex).ok_or(TokenError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(&payload);
        mac.verify_slice(&sig).map_err(|_| TokenError::BadSignature)?;

        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
        if now.unix_timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
