use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use cookie::Cookie;
use serde_json::json;

use bizdash_auth::{LOGIN_PATH, removal_cookie, session_cookie::set_cookie_header};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> Response {
    Redirect::to(location).into_response()
}

/// Append a `Set-Cookie` header to `response`.
pub fn with_cookie(mut response: Response, cookie: &Cookie<'_>) -> Response {
    match HeaderValue::from_str(&set_cookie_header(cookie)) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => tracing::error!("unencodable Set-Cookie header: {err}"),
    }
    response
}

/// Back to the login page, dropping whatever session cookie the client sent.
///
/// Every session failure ends here, so the client cannot tell causes apart.
pub fn login_redirect_clearing_session() -> Response {
    with_cookie(see_other(LOGIN_PATH), &removal_cookie())
}
