use serde::{Deserialize, Serialize};

/// Closed set of dashboard roles carried in the session payload.
///
/// Anything the backend sends that is not one of the four known names
/// (including a missing `role` field) becomes [`Role::Unknown`], which grants
/// no dashboard at all.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    User,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superAdmin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }

    /// The dashboard owned by this role, if any.
    pub fn dashboard(&self) -> Option<Dashboard> {
        match self {
            Role::SuperAdmin => Some(Dashboard::SuperAdmin),
            Role::Admin => Some(Dashboard::Admin),
            Role::Manager => Some(Dashboard::Manager),
            Role::User => Some(Dashboard::User),
            Role::Unknown => None,
        }
    }

    /// Where a session with this role lands after login.
    pub fn landing_path(&self) -> &'static str {
        self.dashboard()
            .map(|d| d.path())
            .unwrap_or(GENERIC_LANDING_PATH)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Landing page for sessions without a recognised role.
pub const GENERIC_LANDING_PATH: &str = "/";

/// Role-specific dashboards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dashboard {
    SuperAdmin,
    Admin,
    Manager,
    User,
}

impl Dashboard {
    pub const ALL: [Dashboard; 4] = [
        Dashboard::SuperAdmin,
        Dashboard::Admin,
        Dashboard::Manager,
        Dashboard::User,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Dashboard::SuperAdmin => "/super-admin-dashboard",
            Dashboard::Admin => "/admin-dashboard",
            Dashboard::Manager => "/manager-dashboard",
            Dashboard::User => "/user-dashboard",
        }
    }

    pub fn owner(&self) -> Role {
        match self {
            Dashboard::SuperAdmin => Role::SuperAdmin,
            Dashboard::Admin => Role::Admin,
            Dashboard::Manager => Role::Manager,
            Dashboard::User => Role::User,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.path() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_deserialize_from_camel_case() {
        let cases = [
            ("\"superAdmin\"", Role::SuperAdmin),
            ("\"admin\"", Role::Admin),
            ("\"manager\"", Role::Manager),
            ("\"user\"", Role::User),
        ];
        for (json, role) in cases {
            assert_eq!(serde_json::from_str::<Role>(json).unwrap(), role);
        }
    }

    #[test]
    fn unrecognised_roles_degrade_to_unknown() {
        for json in ["\"root\"", "\"SuperAdmin\"", "\"ADMIN\"", "\"\""] {
            assert_eq!(serde_json::from_str::<Role>(json).unwrap(), Role::Unknown);
        }
    }

    #[test]
    fn unknown_has_no_dashboard() {
        assert_eq!(Role::Unknown.dashboard(), None);
        assert_eq!(Role::Unknown.landing_path(), GENERIC_LANDING_PATH);
    }

    #[test]
    fn dashboards_round_trip_through_paths() {
        for d in Dashboard::ALL {
            assert_eq!(Dashboard::from_path(d.path()), Some(d));
            assert_eq!(d.owner().dashboard(), Some(d));
        }
        assert_eq!(Dashboard::from_path("/"), None);
    }
}
