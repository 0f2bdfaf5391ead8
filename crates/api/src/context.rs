use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::Response,
};

use bizdash_auth::{Credential, RawToken, RawTokenSource, Role, SessionError, TokenManager, token_from_cookie_header};

use crate::app::errors::{json_error, login_redirect_clearing_session};

/// Server-side token source: the incoming request's `Cookie` headers.
#[derive(Debug, Clone, Copy)]
pub struct RequestCookieSource<'a>(pub &'a HeaderMap);

impl RawTokenSource for RequestCookieSource<'_> {
    fn raw_token(&self) -> Option<RawToken> {
        self.0
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(token_from_cookie_header)
    }
}

/// Decrypted session for a request (role + backend credential).
///
/// Extracting it is the only place a request's token gets decrypted. Any
/// failure clears the cookie and sends the client to the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    role: Role,
    credential: Credential,
}

impl SessionContext {
    pub fn new(role: Role, credential: Credential) -> Self {
        Self { role, credential }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tokens = parts
            .extensions
            .get::<Arc<TokenManager>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("TokenManager extension missing from router");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
            })?;

        match tokens.resolve(&RequestCookieSource(&parts.headers)) {
            Ok(payload) => Ok(SessionContext::new(payload.role, payload.tokens)),
            Err(err) => {
                if !matches!(err, SessionError::MissingToken) {
                    tracing::warn!(error = %err, path = %parts.uri.path(), "invalid session; clearing");
                }
                Err(login_redirect_clearing_session())
            }
        }
    }
}
