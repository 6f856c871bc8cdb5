//! Role → capability derivation.
//!
//! Capabilities are derived, never stored. Every check recomputes them
//! from the user's current role so a role change takes effect on the
//! next check; there is no cache to invalidate. This module is the
//! only place that branches on role names.

use crate::models::role::RoleName;
use crate::models::user::User;

/// The capability bundle derived from a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub is_admin: bool,
    pub can_manage: bool,
    pub can_approve: bool,
}

/// Pure function of the user's role. A user without a role (or with a
/// dangling role reference, which deserializes to `None`) has no
/// capabilities. That is not an error.
pub fn resolve_capabilities(user: &User) -> Capabilities {
    match user.role {
        Some(RoleName::Admin) => Capabilities {
            is_admin: true,
            can_manage: true,
            can_approve: true,
        },
        Some(RoleName::Editor) => Capabilities {
            can_manage: true,
            ..Default::default()
        },
        Some(RoleName::Approver) => Capabilities {
            can_approve: true,
            ..Default::default()
        },
        Some(RoleName::Viewer) | None => Capabilities::default(),
    }
}
