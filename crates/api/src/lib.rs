//! HTTP server: route guard, session resolution, and dashboard endpoints.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

pub use app::build_app;
pub use config::{AppConfig, ConfigError};
