//! Session store adapter: cookie (authoritative) plus local record mirror.

use std::sync::Arc;

use chrono::Utc;
use cookie::{Cookie, CookieJar};

use bizdash_auth::{RawTokenSource, SESSION_COOKIE_NAME, session_cookie};
use bizdash_auth::session_cookie::SESSION_COOKIE_TTL;
use bizdash_core::RawToken;

use crate::store::{RecordStore, StoreError};
use crate::types::{StoreBackend, StoredSessionRecord};

/// Keeps the raw token in the client's cookie jar and mirrors it locally.
///
/// Mirror failures never surface: they are logged and the cookie alone
/// carries the session.
#[derive(Debug)]
pub struct SessionStore {
    jar: CookieJar,
    mirror: Arc<dyn RecordStore>,
}

impl SessionStore {
    pub fn new(mirror: Arc<dyn RecordStore>) -> Self {
        Self {
            jar: CookieJar::new(),
            mirror,
        }
    }

    /// Start from cookies the client already holds (a `Cookie` header value).
    pub fn with_cookie_header(mirror: Arc<dyn RecordStore>, header: &str) -> Self {
        let mut jar = CookieJar::new();
        for cookie in Cookie::split_parse_encoded(header.to_string()).filter_map(Result::ok) {
            jar.add_original(cookie.into_owned());
        }
        Self { jar, mirror }
    }

    /// Write the cookie and replace the mirrored record.
    pub async fn persist(&mut self, token: RawToken) {
        self.jar.add(session_cookie(&token));

        if let Err(err) = self.mirror.put(StoredSessionRecord::new(token)).await {
            tracing::warn!("failed to mirror session token: {err}");
        }
    }

    /// The raw token, read from the cookie.
    pub fn current(&self) -> Option<RawToken> {
        self.jar.raw_token()
    }

    /// Remove cookie and mirrored record. Safe to call on an empty session.
    pub async fn clear(&mut self) {
        if self.jar.get(SESSION_COOKIE_NAME).is_some() {
            self.jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
        }

        if let Err(err) = self.mirror.clear().await {
            tracing::warn!("failed to clear mirrored session token: {err}");
        }
    }

    /// Re-seed a missing cookie from the mirror (app start, cookie loss).
    ///
    /// A mirrored record older than the cookie lifetime is dropped instead.
    pub async fn restore(&mut self) -> Option<RawToken> {
        if let Some(token) = self.current() {
            return Some(token);
        }

        let record = match self.mirror.latest().await {
            Ok(record) => record?,
            Err(err @ StoreError::Corrupt(_)) => {
                tracing::warn!("discarding unreadable mirrored session token: {err}");
                self.clear().await;
                return None;
            }
            Err(err) => {
                tracing::warn!("failed to read mirrored session token: {err}");
                return None;
            }
        };

        let age = Utc::now().signed_duration_since(record.stored_at);
        if age.num_seconds() >= SESSION_COOKIE_TTL.whole_seconds() {
            tracing::info!("mirrored session token expired; discarding");
            self.clear().await;
            return None;
        }

        self.jar.add(session_cookie(&record.token));
        Some(record.token)
    }

    /// Render the jar as a `Cookie` request header value.
    pub fn cookie_header(&self) -> String {
        self.jar
            .iter()
            .map(|c| c.encoded().stripped().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Changes made since construction, as `Set-Cookie` values.
    pub fn pending_set_cookies(&self) -> Vec<String> {
        self.jar.delta().map(|c| c.encoded().to_string()).collect()
    }

    pub fn backend(&self) -> StoreBackend {
        self.mirror.backend()
    }
}
