use thiserror::Error;

use crate::cipher::CipherError;

/// Why a session could not be resolved.
///
/// Kept explicit for logging and tests. Public surfaces collapse every
/// variant to "not authenticated" so callers never branch on the cause.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no session token present")]
    MissingToken,

    #[error("malformed session token: {0}")]
    MalformedToken(String),

    #[error("session token decryption failed: {0}")]
    Decryption(CipherError),

    #[error("session payload is invalid: {0}")]
    Parse(String),
}

impl From<CipherError> for SessionError {
    fn from(value: CipherError) -> Self {
        match value {
            CipherError::Malformed(msg) => SessionError::MalformedToken(msg),
            other => SessionError::Decryption(other),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        SessionError::Parse(value.to_string())
    }
}
