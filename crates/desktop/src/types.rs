//! Shared types for the client session layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bizdash_core::{RawToken, SessionRecordId};

/// The mirrored session record kept in the local store.
///
/// At most one is meaningful at a time; the store keeps only the newest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSessionRecord {
    pub id: SessionRecordId,
    pub token: RawToken,
    pub stored_at: DateTime<Utc>,
}

impl StoredSessionRecord {
    /// A fresh record for `token` with a new time-ordered id.
    pub fn new(token: RawToken) -> Self {
        Self {
            id: SessionRecordId::new(),
            token,
            stored_at: Utc::now(),
        }
    }
}

/// Which backend the local store ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    /// Persistent storage was unavailable; the session lasts for this process only.
    Memory,
}
