//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Key of a mirrored session record in the local store.
///
/// UUIDv7 is time-ordered, so the newest record sorts last.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecordId(Uuid);

impl SessionRecordId {
    /// Create a fresh, time-ordered identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionRecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for SessionRecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<SessionRecordId> for Uuid {
    fn from(value: SessionRecordId) -> Self {
        value.0
    }
}

impl FromStr for SessionRecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("SessionRecordId: {e}")))?;
        Ok(Self(uuid))
    }
}
