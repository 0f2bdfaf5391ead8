//! `bizdash-desktop`
//!
//! **Responsibility:** the client-side session context.
//!
//! This crate provides:
//! - The session store adapter (cookie jar + local SQLite mirror)
//! - Degradation to an in-memory session when storage is unavailable
//! - A `DesktopSession` façade resolving credential and role on demand
//!
//! The backend API remains the authority; this is a **thin shell** around it.

pub mod client;
pub mod session;
pub mod store;
pub mod types;

pub use client::{DesktopConfig, DesktopSession, LoginError};
pub use session::SessionStore;
pub use store::{MemoryRecordStore, RecordStore, SqliteRecordStore, StoreError, open_record_store};
pub use types::{StoreBackend, StoredSessionRecord};
