use serde::{Deserialize, Serialize};

use bizdash_auth::{Dashboard, RawToken, Role};

// -------------------------
// Request DTOs
// -------------------------

/// Hand-off from the login form once the backend has issued a token.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub token: RawToken,
    /// Page the user originally asked for.
    pub from: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub from: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Minimal page description; rendering belongs to the frontend.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub dashboard: Dashboard,
    pub path: &'static str,
    pub role: Role,
}

impl DashboardResponse {
    pub fn new(dashboard: Dashboard, role: Role) -> Self {
        Self {
            dashboard,
            path: dashboard.path(),
            role,
        }
    }
}

/// Never includes the credential.
#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub role: Role,
    pub landing: &'static str,
}
