//! Route guard decision (coarse authentication gate).
//!
//! The guard only looks at whether a raw session token is *present*. It never
//! decrypts it: which dashboard a role may reach is decided downstream by
//! [`crate::authorize`].

/// Login page; the redirect target for unauthenticated navigations.
pub const LOGIN_PATH: &str = "/login";

/// Registration page.
pub const REGISTRATION_PATH: &str = "/registration";

/// Query parameter carrying the originally requested path.
pub const RETURN_TO_PARAM: &str = "from";

/// Prefix under which the server ships its own bundled assets.
pub const INTERNAL_ASSET_PREFIX: &str = "/_app/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin { location: String },
}

impl GuardDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    public_paths: Vec<String>,
    asset_prefixes: Vec<String>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            public_paths: vec![LOGIN_PATH.to_string(), REGISTRATION_PATH.to_string()],
            asset_prefixes: vec![INTERNAL_ASSET_PREFIX.to_string()],
        }
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path that is reachable without a session.
    pub fn with_public_path(mut self, path: impl Into<String>) -> Self {
        self.public_paths.push(path.into());
        self
    }

    pub fn with_asset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.asset_prefixes.push(prefix.into());
        self
    }

    pub fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        self.public_paths.iter().any(|p| p == path)
    }

    pub fn is_static_asset(&self, path: &str) -> bool {
        self.asset_prefixes.iter().any(|p| path.starts_with(p.as_str())) || has_file_extension(path)
    }

    /// Decide for a single navigation.
    ///
    /// `path_and_query` is the request target (`/x?y=z`); only the path part
    /// is matched, the whole target is preserved in the redirect.
    pub fn evaluate(&self, path_and_query: &str, token_present: bool) -> GuardDecision {
        let path = path_and_query
            .split_once('?')
            .map_or(path_and_query, |(p, _)| p);

        if self.is_public(path) || self.is_static_asset(path) || token_present {
            return GuardDecision::Allow;
        }

        GuardDecision::RedirectToLogin {
            location: login_location(path_and_query),
        }
    }
}

/// `/login?from=<encoded original target>`, or bare `/login` for the root.
pub fn login_location(return_to: &str) -> String {
    if return_to.is_empty() || return_to == "/" {
        return LOGIN_PATH.to_string();
    }
    format!(
        "{LOGIN_PATH}?{RETURN_TO_PARAM}={}",
        urlencoding::encode(return_to)
    )
}

/// Accept a post-login return target only if it stays on this site.
///
/// Control characters are rejected outright: browsers strip tab and newlines
/// while parsing, which can turn `/\t/host` into `//host`.
pub fn safe_return_path(candidate: &str) -> Option<&str> {
    let local = candidate.starts_with('/')
        && !candidate.starts_with("//")
        && !candidate.contains('\\')
        && !candidate.contains("://")
        && !candidate.chars().any(char::is_control);
    if local && !targets_login(candidate) {
        Some(candidate)
    } else {
        None
    }
}

/// `/login` itself, with or without a query, fragment, or trailing segments.
fn targets_login(path: &str) -> bool {
    match path.strip_prefix(LOGIN_PATH) {
        Some(rest) => rest.is_empty() || rest.starts_with(['?', '/', '#']),
        None => false,
    }
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

fn has_file_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or("");
    match last.rfind('.') {
        Some(idx) => idx > 0 && idx + 1 < last.len(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_allow_regardless_of_token() {
        let guard = RouteGuard::default();
        for path in ["/login", "/registration", "/login/", "/login?from=%2Fx"] {
            assert!(guard.evaluate(path, false).is_allow(), "{path}");
            assert!(guard.evaluate(path, true).is_allow(), "{path}");
        }
    }

    #[test]
    fn protected_path_without_token_redirects() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate("/manager-dashboard", false),
            GuardDecision::RedirectToLogin {
                location: "/login?from=%2Fmanager-dashboard".to_string()
            }
        );
    }

    #[test]
    fn protected_path_with_any_token_allows() {
        let guard = RouteGuard::default();
        assert!(guard.evaluate("/manager-dashboard", true).is_allow());
    }

    #[test]
    fn redirect_preserves_query() {
        let guard = RouteGuard::default();
        match guard.evaluate("/admin-dashboard?month=2024-05", false) {
            GuardDecision::RedirectToLogin { location } => {
                assert_eq!(location, "/login?from=%2Fadmin-dashboard%3Fmonth%3D2024-05");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn root_redirects_to_bare_login() {
        assert_eq!(
            RouteGuard::default().evaluate("/", false),
            GuardDecision::RedirectToLogin { location: "/login".to_string() }
        );
    }

    #[test]
    fn static_assets_bypass_the_gate() {
        let guard = RouteGuard::default();
        for path in ["/favicon.ico", "/img/logo.png", "/_app/chunk", "/_app/x/y"] {
            assert!(guard.evaluate(path, false).is_allow(), "{path}");
        }
    }

    #[test]
    fn dots_that_are_not_extensions_stay_gated() {
        let guard = RouteGuard::default();
        for path in ["/.hidden", "/reports/trailing.", "/v1.2/reports"] {
            assert!(!guard.evaluate(path, false).is_allow(), "{path}");
        }
    }

    #[test]
    fn public_lookalikes_stay_gated() {
        let guard = RouteGuard::default();
        for path in ["/login-history", "/loginx", "/registration/admin"] {
            assert!(!guard.evaluate(path, false).is_allow(), "{path}");
        }
    }

    #[test]
    fn extra_public_paths() {
        let guard = RouteGuard::default().with_public_path("/health");
        assert!(guard.evaluate("/health", false).is_allow());
    }

    #[test]
    fn return_paths_must_be_local() {
        assert_eq!(safe_return_path("/manager-dashboard"), Some("/manager-dashboard"));
        for bad in ["https://evil.example", "//evil.example", "/\\evil", "manager", "/login?from=/x"] {
            assert_eq!(safe_return_path(bad), None, "{bad}");
        }
    }

    #[test]
    fn return_paths_with_control_characters_are_rejected() {
        for bad in ["/\t/evil.example/", "/\n/evil.example", "/\r\n/evil", "/dash\u{0}board"] {
            assert_eq!(safe_return_path(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn only_the_login_page_itself_is_refused() {
        for bad in ["/login", "/login/", "/login?from=%2Fx", "/login#top"] {
            assert_eq!(safe_return_path(bad), None, "{bad}");
        }
        for ok in ["/login-history", "/logins", "/reports/login"] {
            assert_eq!(safe_return_path(ok), Some(ok), "{ok}");
        }
    }
}
