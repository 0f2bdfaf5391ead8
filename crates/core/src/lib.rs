//! `bizdash-core`: shared session primitives.
//!
//! This crate contains **pure** value types (no crypto, no IO).

pub mod error;
pub mod id;
pub mod token;

pub use error::{DomainError, DomainResult};
pub use id::SessionRecordId;
pub use token::{RawToken, TokenSegments};
