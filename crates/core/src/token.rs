//! The opaque session token issued by the backend.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Encrypted session string of the form `<ivBase64>:<ciphertextBase64>`.
///
/// Treated as a single atomic value: it is replaced wholesale on login and
/// never mutated. The contents are a secret, so `Debug` only reports length.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawToken(String);

/// The two halves of a [`RawToken`], still base64-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSegments<'a> {
    pub iv: &'a str,
    pub ciphertext: &'a str,
}

impl RawToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Interpret a cookie value as a token. Blank values count as absent.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Split on the first `:` into IV and ciphertext.
    ///
    /// Exactly two non-empty segments are required; a second `:` makes the
    /// token malformed.
    pub fn segments(&self) -> DomainResult<TokenSegments<'_>> {
        let (iv, ciphertext) = self
            .0
            .split_once(':')
            .ok_or_else(|| DomainError::validation("token has no ':' separator"))?;

        if iv.is_empty() || ciphertext.is_empty() {
            return Err(DomainError::validation("token has an empty segment"));
        }
        if ciphertext.contains(':') {
            return Err(DomainError::validation("token has more than two segments"));
        }

        Ok(TokenSegments { iv, ciphertext })
    }
}

impl core::fmt::Debug for RawToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawToken")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl From<String> for RawToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}
