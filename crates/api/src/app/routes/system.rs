use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::app::{dto::WhoAmIResponse, errors};
use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(session: SessionContext) -> impl IntoResponse {
    Json(WhoAmIResponse {
        role: session.role(),
        landing: session.role().landing_path(),
    })
}

pub async fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "no such page")
}
