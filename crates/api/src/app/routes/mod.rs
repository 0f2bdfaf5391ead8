use axum::{
    Router,
    routing::{get, post},
};

pub mod dashboards;
pub mod session;
pub mod system;

/// Every endpoint; the route guard is layered on top in `build_app`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/whoami", get(system::whoami))
        .route("/login", get(session::login_page).post(session::login))
        .route("/registration", get(session::registration_page))
        .route("/logout", post(session::logout))
        .merge(dashboards::router())
}
