//! HTTP application wiring (Axum router + shared session services).
//!
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: error and redirect responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use bizdash_auth::{RouteGuard, TokenManager};

use crate::config::AppConfig;
use crate::middleware::{self, GuardState};

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    let tokens = Arc::new(TokenManager::new(&config.session_secret));
    let guard_state = GuardState {
        guard: Arc::new(
            RouteGuard::default()
                .with_public_path("/health")
                .with_public_path("/logout"),
        ),
    };

    routes::router()
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    guard_state,
                    middleware::route_guard,
                ))
                .layer(Extension(tokens)),
        )
}
