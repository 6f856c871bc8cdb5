//! Authorization policy — maps (actor, action) to allow/deny.
//!
//! Transport-independent. Denial is the typed [`CurioError::Forbidden`]
//! outcome; it is never raised for internal control flow. Tenant
//! isolation itself is enforced by query filtering at the repository
//! boundary; [`business_scope`] is the only source of the tenant id
//! that services may pass there.

use uuid::Uuid;

use crate::capabilities::resolve_capabilities;
use crate::error::{CurioError, CurioResult};
use crate::models::user::User;

pub fn can_manage_products(actor: &User) -> bool {
    resolve_capabilities(actor).can_manage
}

pub fn can_approve_products(actor: &User) -> bool {
    resolve_capabilities(actor).can_approve
}

pub fn can_administer_users(actor: &User) -> bool {
    resolve_capabilities(actor).is_admin
}

/// Required for: create, edit, delete, submit.
pub fn require_manage_products(actor: &User) -> CurioResult<()> {
    if can_manage_products(actor) {
        Ok(())
    } else {
        Err(CurioError::Forbidden {
            reason: "managing products requires the admin or editor role".into(),
        })
    }
}

/// Required for: approve, reject.
pub fn require_approve_products(actor: &User) -> CurioResult<()> {
    if can_approve_products(actor) {
        Ok(())
    } else {
        Err(CurioError::Forbidden {
            reason: "approving products requires the admin or approver role".into(),
        })
    }
}

/// Required for: listing, creating, updating and deleting users within
/// the actor's own business.
pub fn require_administer_users(actor: &User) -> CurioResult<()> {
    if can_administer_users(actor) {
        Ok(())
    } else {
        Err(CurioError::Forbidden {
            reason: "user administration requires the admin role".into(),
        })
    }
}

/// The actor's own business id, the tenant scope for every repository
/// call made on their behalf. An actor without a business cannot touch
/// tenant-scoped data at all.
pub fn business_scope(actor: &User) -> CurioResult<Uuid> {
    actor.business_id.ok_or_else(|| CurioError::Forbidden {
        reason: "actor is not a member of any business".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::RoleName;
    use chrono::Utc;

    fn actor(role: Option<RoleName>, business_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            business_id,
            username: "u".into(),
            email: "u@example.com".into(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn viewer_is_denied_everywhere() {
        let viewer = actor(Some(RoleName::Viewer), Some(Uuid::new_v4()));
        assert!(matches!(
            require_manage_products(&viewer),
            Err(CurioError::Forbidden { .. })
        ));
        assert!(matches!(
            require_approve_products(&viewer),
            Err(CurioError::Forbidden { .. })
        ));
        assert!(matches!(
            require_administer_users(&viewer),
            Err(CurioError::Forbidden { .. })
        ));
    }

    #[test]
    fn admin_passes_all_guards() {
        let admin = actor(Some(RoleName::Admin), Some(Uuid::new_v4()));
        assert!(require_manage_products(&admin).is_ok());
        assert!(require_approve_products(&admin).is_ok());
        assert!(require_administer_users(&admin).is_ok());
    }

    #[test]
    fn business_scope_requires_membership() {
        let business_id = Uuid::new_v4();
        let member = actor(Some(RoleName::Editor), Some(business_id));
        assert_eq!(business_scope(&member).unwrap(), business_id);

        let orphan = actor(Some(RoleName::Editor), None);
        assert!(matches!(
            business_scope(&orphan),
            Err(CurioError::Forbidden { .. })
        ));
    }
}
