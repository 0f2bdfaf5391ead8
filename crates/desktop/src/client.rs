//! Client-side session façade: store adapter + token manager.

use std::path::PathBuf;

use thiserror::Error;

use bizdash_auth::{BrowserCookieSource, Credential, Role, SessionError, SessionPayload, TokenManager};
use bizdash_core::RawToken;

use crate::session::SessionStore;
use crate::store::open_record_store;
use crate::types::StoreBackend;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Shared secret; must match the backend that issues tokens.
    pub session_secret: String,
    /// Override for the session database; defaults to the app data dir.
    pub db_path: Option<PathBuf>,
}

impl DesktopConfig {
    pub fn new(session_secret: impl Into<String>) -> Self {
        Self {
            session_secret: session_secret.into(),
            db_path: None,
        }
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// The issued token does not resolve to a session. Deliberately opaque.
    #[error("login failed")]
    Rejected,
}

/// One client's session for the lifetime of the process.
#[derive(Debug)]
pub struct DesktopSession {
    store: SessionStore,
    tokens: TokenManager,
}

impl DesktopSession {
    /// Open the local mirror and seed the cookie from it.
    pub async fn start(config: DesktopConfig) -> Self {
        let mirror = open_record_store(config.db_path).await;
        let mut store = SessionStore::new(mirror);

        if store.restore().await.is_some() {
            tracing::info!("restored session from local store");
        }

        Self::from_parts(store, TokenManager::new(&config.session_secret))
    }

    pub fn from_parts(store: SessionStore, tokens: TokenManager) -> Self {
        Self { store, tokens }
    }

    /// Accept a token issued by the backend at login.
    ///
    /// Only tokens that decrypt to a valid payload are persisted.
    pub async fn login(&mut self, token: RawToken) -> Result<Role, LoginError> {
        let payload = self.tokens.resolve_token(&token).map_err(|err| {
            tracing::warn!(error = %err, "rejected token at login");
            LoginError::Rejected
        })?;

        self.store.persist(token).await;
        tracing::info!(role = %payload.role, "session started");
        Ok(payload.role)
    }

    pub async fn logout(&mut self) {
        self.store.clear().await;
        tracing::info!("session ended");
    }

    /// Resolve the stored session; a token that no longer resolves is dropped.
    async fn payload(&mut self) -> Option<SessionPayload> {
        let header = self.store.cookie_header();
        match self.tokens.resolve(&BrowserCookieSource(&header)) {
            Ok(payload) => Some(payload),
            Err(SessionError::MissingToken) => None,
            Err(err) => {
                tracing::warn!(error = %err, "stored session is invalid; logging out");
                self.logout().await;
                None
            }
        }
    }

    /// Bearer credential for backend calls.
    pub async fn credential(&mut self) -> Option<Credential> {
        self.payload().await.map(|p| p.tokens)
    }

    pub async fn role(&mut self) -> Option<Role> {
        self.payload().await.map(|p| p.role)
    }

    /// Where navigation should go right now.
    pub async fn landing(&mut self) -> &'static str {
        match self.role().await {
            Some(role) => role.landing_path(),
            None => bizdash_auth::LOGIN_PATH,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.current().is_some()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn storage_backend(&self) -> StoreBackend {
        self.store.backend()
    }
}
