//! `bizdash-auth`: session confidentiality and role gating.
//!
//! This crate is intentionally decoupled from HTTP frameworks and storage.

pub mod authorize;
pub mod cipher;
pub mod error;
pub mod guard;
pub mod payload;
pub mod roles;
pub mod session_cookie;
pub mod token;

pub use authorize::{AuthzError, authorize_dashboard};
pub use cipher::{CipherError, SessionCipher, decrypt};
pub use error::SessionError;
pub use guard::{GuardDecision, LOGIN_PATH, REGISTRATION_PATH, RouteGuard};
pub use payload::{Credential, SessionPayload};
pub use roles::{Dashboard, GENERIC_LANDING_PATH, Role};
pub use session_cookie::{SESSION_COOKIE_NAME, removal_cookie, session_cookie};
pub use token::{BrowserCookieSource, RawTokenSource, TokenManager, token_from_cookie_header};

pub use bizdash_core::RawToken;
