//! Token manager: locate the raw token, decrypt it, project the credential.
//!
//! Where the raw token comes from depends on the execution context, so the
//! caller picks a [`RawTokenSource`]:
//! - [`BrowserCookieSource`]: a client-side `Cookie` header string
//! - [`cookie::CookieJar`]: a request-scoped cookie accessor
//!
//! The HTTP layer adds its own source over request headers.

use cookie::{Cookie, CookieJar};

use bizdash_core::RawToken;

use crate::cipher::SessionCipher;
use crate::error::SessionError;
use crate::payload::{Credential, SessionPayload};
use crate::session_cookie::SESSION_COOKIE_NAME;

/// Anything that can hand over the raw session token for the current context.
pub trait RawTokenSource {
    fn raw_token(&self) -> Option<RawToken>;
}

/// Client-side cookie string (`name=value; other=value`).
#[derive(Debug, Clone, Copy)]
pub struct BrowserCookieSource<'a>(pub &'a str);

impl RawTokenSource for BrowserCookieSource<'_> {
    fn raw_token(&self) -> Option<RawToken> {
        token_from_cookie_header(self.0)
    }
}

impl RawTokenSource for CookieJar {
    fn raw_token(&self) -> Option<RawToken> {
        self.get(SESSION_COOKIE_NAME)
            .and_then(|c| RawToken::from_cookie_value(c.value()))
    }
}

impl<S: RawTokenSource + ?Sized> RawTokenSource for &S {
    fn raw_token(&self) -> Option<RawToken> {
        (**self).raw_token()
    }
}

impl RawTokenSource for Option<RawToken> {
    fn raw_token(&self) -> Option<RawToken> {
        self.clone()
    }
}

/// Find the session token in a `Cookie` header value.
///
/// Unparseable pairs are skipped rather than failing the whole header.
pub fn token_from_cookie_header(header: &str) -> Option<RawToken> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .and_then(|c| RawToken::from_cookie_value(c.value()))
}

/// Stateless façade over the cipher. Every call re-reads and re-decrypts.
#[derive(Debug, Clone)]
pub struct TokenManager {
    cipher: SessionCipher,
}

impl TokenManager {
    pub fn new(secret: &str) -> Self {
        Self {
            cipher: SessionCipher::new(secret),
        }
    }

    pub fn cipher(&self) -> &SessionCipher {
        &self.cipher
    }

    /// Resolve the full payload, keeping the failure cause.
    pub fn resolve(&self, source: &impl RawTokenSource) -> Result<SessionPayload, SessionError> {
        let token = source.raw_token().ok_or(SessionError::MissingToken)?;
        self.resolve_token(&token)
    }

    /// Decrypt and parse a token already in hand.
    pub fn resolve_token(&self, token: &RawToken) -> Result<SessionPayload, SessionError> {
        let plaintext = self.cipher.decrypt(token)?;
        Ok(SessionPayload::from_json(&plaintext)?)
    }

    /// Resolve the credential, collapsing every failure to `None`.
    pub fn credential(&self, source: &impl RawTokenSource) -> Option<Credential> {
        match self.resolve(source) {
            Ok(payload) => Some(payload.tokens),
            Err(SessionError::MissingToken) => None,
            Err(err) => {
                tracing::warn!(error = %err, "session token rejected");
                None
            }
        }
    }

    /// Client context: read the token from a `document.cookie`-style string.
    pub fn get_client_side_token(&self, cookie_header: &str) -> Option<Credential> {
        self.credential(&BrowserCookieSource(cookie_header))
    }

    /// Server context: read the token from the incoming request's cookies.
    pub fn get_server_side_token(&self, request: &impl RawTokenSource) -> Option<Credential> {
        self.credential(request)
    }
}
