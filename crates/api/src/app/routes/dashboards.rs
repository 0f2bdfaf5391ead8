use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::get,
};

use bizdash_auth::{Dashboard, authorize_dashboard};

use crate::app::{
    dto::{DashboardResponse, PageResponse},
    errors,
};
use crate::context::SessionContext;

pub fn router() -> Router {
    Dashboard::ALL.into_iter().fold(
        Router::new().route("/", get(landing)),
        |router, dashboard| {
            router.route(
                dashboard.path(),
                get(move |session: SessionContext| async move { show(dashboard, session) }),
            )
        },
    )
}

/// `/`: send known roles to their dashboard, everyone else gets the generic page.
pub async fn landing(session: SessionContext) -> Response {
    match session.role().dashboard() {
        Some(dashboard) => errors::see_other(dashboard.path()),
        None => Json(PageResponse {
            page: "landing",
            from: None,
        })
        .into_response(),
    }
}

fn show(dashboard: Dashboard, session: SessionContext) -> Response {
    match authorize_dashboard(session.role(), dashboard) {
        Ok(()) => Json(DashboardResponse::new(dashboard, session.role())).into_response(),
        Err(err) => {
            tracing::debug!(role = %session.role(), error = %err, "dashboard not permitted");
            errors::see_other(session.role().landing_path())
        }
    }
}
