use thiserror::Error;

use crate::{Dashboard, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("role has no dashboard access")]
    NoAccess,

    #[error("forbidden: {path} belongs to role '{owner}'")]
    Forbidden { path: &'static str, owner: Role },
}

/// Role-based dashboard authorization, applied after the session decrypts.
///
/// - No IO
/// - No panics
/// - Each dashboard belongs to exactly one role; `Unknown` reaches none.
pub fn authorize_dashboard(role: Role, dashboard: Dashboard) -> Result<(), AuthzError> {
    match role.dashboard() {
        None => Err(AuthzError::NoAccess),
        Some(own) if own == dashboard => Ok(()),
        Some(_) => Err(AuthzError::Forbidden {
            path: dashboard.path(),
            owner: dashboard.owner(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_role_reaches_only_its_own_dashboard() {
        for dashboard in Dashboard::ALL {
            for role in [Role::SuperAdmin, Role::Admin, Role::Manager, Role::User] {
                let allowed = authorize_dashboard(role, dashboard).is_ok();
                assert_eq!(allowed, dashboard.owner() == role, "{role} -> {dashboard:?}");
            }
        }
    }

    #[test]
    fn unknown_role_is_never_elevated() {
        for dashboard in Dashboard::ALL {
            assert_eq!(
                authorize_dashboard(Role::Unknown, dashboard),
                Err(AuthzError::NoAccess)
            );
        }
    }
}
