//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! owns the workspace behind a `RwLock`, the persistence port it is saved
//! through, the live login sessions, and the token signer. Mutating handlers
//! call [`AppState::persist`] while still holding the write guard so saves are
//! applied in mutation order.

use std::sync::Arc;

use pillarx::registry::Registry;
use pillarx::store::Store;
use pillarx::workspace::Workspace;
use tokio::sync::RwLock;
use tracing::error;

use crate::services::session::SessionStore;
use crate::services::token::TokenSigner;

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<RwLock<Workspace>>,
    pub store: Arc<dyn Store>,
    pub sessions: Arc<RwLock<SessionStore>>,
    pub tokens: Arc<TokenSigner>,
    pub registry: &'static Registry,
}

impl AppState {
    /// Load the workspace from `store` and wrap everything for sharing.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, tokens: TokenSigner) -> Self {
        let workspace = Workspace::load(store.as_ref());
        let sessions = SessionStore::new(tokens.ttl());
        Self {
            workspace: Arc::new(RwLock::new(workspace)),
            store,
            sessions: Arc::new(RwLock::new(sessions)),
            tokens: Arc::new(tokens),
            registry: Registry::standard(),
        }
    }

    /// Save a snapshot. Failures are logged; the in-memory state stays
    /// authoritative until the next successful save.
    pub fn persist(&self, workspace: &Workspace) {
        if let Err(e) = workspace.save(self.store.as_ref()) {
            error!(error = %e, "workspace save failed");
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pillarx::activity::Origin;
    use pillarx::store::{MemoryStore, Snapshot, StoreError};
    use pillarx::workspace::Caller;

    use super::*;
    use crate::routes::auth::{AuthUser, ClientInfo};
    use crate::services::auth;

    /// `AppState` over an empty in-memory store, so it starts with the demo projects.
    #[must_use]
    pub fn test_app_state() -> AppState {
        let tokens = TokenSigner::new("test-secret", 3600).unwrap();
        AppState::new(Arc::new(MemoryStore::new()), tokens)
    }

    /// In-memory store that counts successful saves.
    #[derive(Default)]
    pub struct CountingStore {
        inner: MemoryStore,
        saves: AtomicUsize,
    }

    impl CountingStore {
        pub fn saves(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    impl Store for CountingStore {
        fn load(&self) -> Result<Option<Snapshot>, StoreError> {
            self.inner.load()
        }

        fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
            self.inner.save(snapshot)?;
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Like [`test_app_state`], also returning the store to read its save count.
    #[must_use]
    pub fn counting_app_state() -> (AppState, Arc<CountingStore>) {
        let store = Arc::new(CountingStore::default());
        let tokens = TokenSigner::new("test-secret", 3600).unwrap();
        (AppState::new(store.clone(), tokens), store)
    }

    #[must_use]
    pub fn browser() -> ClientInfo {
        ClientInfo { ip_address: "127.0.0.1".into(), user_agent: "Mozilla/5.0 (X11; Linux x86_64)".into() }
    }

    /// Register and log in `email`, returning the extractor a bearer request would yield.
    pub async fn login_as(state: &AppState, email: &str) -> AuthUser {
        let caller = Caller::anonymous(Origin::new("127.0.0.1", "Mozilla/5.0"));
        let mut workspace = state.workspace.write().await;
        let mut sessions = state.sessions.write().await;
        auth::register(&mut workspace, email, "pw", Some("Test User".into()), &caller).unwrap();
        let outcome = auth::login(&mut workspace, &mut sessions, &state.tokens, email, "pw", &caller).unwrap();
        let claims = state.tokens.verify(&outcome.token, time::OffsetDateTime::now_utc()).unwrap();
        AuthUser { user_id: claims.sub, email: claims.email, session_id: claims.sid }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
