use std::sync::Arc;

use axum::{
    extract::State,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use bizdash_auth::{GuardDecision, RawTokenSource, RouteGuard};

use crate::context::RequestCookieSource;

#[derive(Clone)]
pub struct GuardState {
    pub guard: Arc<RouteGuard>,
}

/// Route guard: runs before every handler.
///
/// Only checks that a session cookie is present; decryption and role checks
/// happen in the handlers that need them.
pub async fn route_guard(
    State(state): State<GuardState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let decision = {
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| req.uri().path());
        let token_present = RequestCookieSource(req.headers()).raw_token().is_some();
        state.guard.evaluate(target, token_present)
    };

    match decision {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::RedirectToLogin { location } => {
            tracing::debug!(path = %req.uri().path(), "no session cookie; redirecting to login");
            Redirect::temporary(&location).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let state = GuardState {
            guard: Arc::new(RouteGuard::default()),
        };
        Router::new()
            .route("/login", get(|| async { "login" }))
            .route("/manager-dashboard", get(|| async { "dashboard" }))
            .route("/logo.png", get(|| async { "png" }))
            .layer(axum::middleware::from_fn_with_state(state, route_guard))
    }

    async fn call(path: &str, cookie: Option<&str>) -> Response {
        let mut req = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn login_is_always_reachable() {
        assert_eq!(call("/login", None).await.status(), StatusCode::OK);
        assert_eq!(call("/login", Some("sessionToken=x:y")).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_cookie_redirects_to_login() {
        let res = call("/manager-dashboard", None).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            res.headers()[header::LOCATION],
            "/login?from=%2Fmanager-dashboard"
        );
    }

    #[tokio::test]
    async fn empty_cookie_counts_as_missing() {
        let res = call("/manager-dashboard", Some("sessionToken=")).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn garbage_cookie_passes_the_gate() {
        let res = call("/manager-dashboard", Some("sessionToken=aXYx:Y2lwaGVy")).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn static_assets_are_not_gated() {
        assert_eq!(call("/logo.png", None).await.status(), StatusCode::OK);
    }
}
