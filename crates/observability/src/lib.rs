//! Process-wide structured logging shared by the server and desktop client.

/// Initialize JSON logging, filtered by `RUST_LOG` (default [`DEFAULT_FILTER`]).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(DEFAULT_FILTER);
}

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

pub mod subscriber;
