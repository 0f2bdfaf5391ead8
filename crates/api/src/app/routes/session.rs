use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

use bizdash_auth::{TokenManager, guard::safe_return_path, removal_cookie, session_cookie};

use crate::app::{
    dto::{LoginQuery, LoginRequest, PageResponse},
    errors,
};

pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    let from = query
        .from
        .as_deref()
        .and_then(safe_return_path)
        .map(str::to_string);
    Json(PageResponse { page: "login", from })
}

pub async fn registration_page() -> impl IntoResponse {
    Json(PageResponse {
        page: "registration",
        from: None,
    })
}

/// Accept a freshly issued token and install it as the session cookie.
///
/// The token is resolved first so a client never ends up holding a cookie
/// that every later request would reject.
pub async fn login(
    Extension(tokens): Extension<Arc<TokenManager>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "login rejected: unreadable body");
            return errors::login_redirect_clearing_session();
        }
    };

    let payload = match tokens.resolve_token(&body.token) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "login rejected");
            return errors::login_redirect_clearing_session();
        }
    };

    let target = body
        .from
        .as_deref()
        .and_then(safe_return_path)
        .unwrap_or_else(|| payload.role.landing_path());

    tracing::info!(role = %payload.role, "session established");
    errors::with_cookie(errors::see_other(target), &session_cookie(&body.token))
}

pub async fn logout() -> Response {
    errors::with_cookie(
        errors::see_other(bizdash_auth::LOGIN_PATH),
        &removal_cookie(),
    )
}
