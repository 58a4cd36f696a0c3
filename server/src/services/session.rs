//! Login sessions and hex helpers.
//!
//! ARCHITECTURE
//! ============
//! A login creates a session keyed by a random hex id. The bearer token
//! carries that id; a token is only honoured while its session exists, so
//! logout revokes the token even before it expires. Sessions live in memory
//! and do not survive a restart. Each one expires with its token; expired
//! sessions are dropped whenever a new one is opened.

use std::collections::HashMap;
use std::fmt::Write;

use pillarx::activity::Origin;
use pillarx::actor::{ActorType, detect_actor};
use rand::Rng;
use time::{Duration, OffsetDateTime};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Inverse of [`bytes_to_hex`]. `None` on odd length or a non-hex digit.
pub(crate) fn hex_to_bytes(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| hex.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub ip_address: String,
    pub user_agent: String,
    pub actor_type: ActorType,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    /// Sessions opened by this store live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: HashMap::new(), ttl }
    }

    /// Open a session for `user_id`, classifying the client from its user-agent.
    pub fn create(&mut self, user_id: &str, origin: &Origin) -> Session {
        self.create_at(user_id, origin, OffsetDateTime::now_utc())
    }

    /// [`SessionStore::create`] at an explicit time. Sessions expired at `now`
    /// are removed first.
    pub fn create_at(&mut self, user_id: &str, origin: &Origin, now: OffsetDateTime) -> Session {
        self.sessions.retain(|_, s| !s.is_expired(now));
        let session = Session {
            id: generate_token(),
            user_id: user_id.to_owned(),
            ip_address: origin.ip_address.clone(),
            user_agent: origin.user_agent.clone(),
            actor_type: detect_actor(&origin.user_agent),
            created_at: now,
            expires_at: now.saturating_add(self.ttl),
        };
        self.sessions.insert(session.id.clone(), session.clone());
        session
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Returns whether a session was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
