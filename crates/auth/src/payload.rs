use serde::{Deserialize, Serialize};

use crate::Role;

/// Backend-issued bearer credential (the payload's `tokens` field).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value for backend calls.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Decrypted session content.
///
/// Only lives in memory; never written anywhere in plaintext. Fields other
/// than `tokens` and `role` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionPayload {
    pub tokens: Credential,

    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Role,
}

/// `null`, numbers and other non-role values degrade to `Unknown` instead of
/// failing the whole payload.
fn lenient_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

impl SessionPayload {
    /// Parse decrypted plaintext. The credential must be a non-empty string.
    pub fn from_json(plaintext: &str) -> Result<Self, serde_json::Error> {
        let payload: SessionPayload = serde_json::from_str(plaintext)?;
        if payload.tokens.as_str().is_empty() {
            return Err(serde::de::Error::custom("empty credential"));
        }
        Ok(payload)
    }
}
