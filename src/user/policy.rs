//! Authorization policy
//!
//! Every facility, event and access is owned by exactly one admin. A
//! principal reaches a record through its *effective admin*: an admin is its
//! own effective admin, an employee inherits its manager. Record-level checks
//! compare the stored owner against that resolution; list operations widen an
//! admin's view to records stamped with the ids of employees it manages.

use crate::store::Tables;
use crate::types::{Role, UserId};
use crate::user::Principal;
use crate::{ParkingError, ParkingResult};

/// Resolve the admin account that scopes this principal's actions
///
/// Returns `None` for an employee that has no manager assigned; such a
/// principal sees empty listings and cannot touch any owned record.
pub fn effective_admin(principal: &Principal) -> Option<UserId> {
    match principal.role {
        Role::Admin => Some(principal.id),
        Role::Employee => principal.manager,
    }
}

/// Require that `principal` reaches the record owned by `owner`
///
/// On success returns the effective admin id so callers can stamp it onto
/// records they create.
pub(crate) fn ensure_owner(
    owner: UserId,
    principal: &Principal,
    what: &str,
) -> ParkingResult<UserId> {
    match effective_admin(principal) {
        Some(admin) if admin == owner => Ok(admin),
        _ => Err(ParkingError::forbidden(format!("no permission to access this {what}"))),
    }
}

/// Owner ids visible to `principal` in list operations
///
/// Admins see their own records plus records stamped with the ids of the
/// employees they manage; employees see their admin's records. `None` means
/// the principal is an employee without a manager and must get empty results
/// rather than an error.
pub(crate) fn visible_owners(tables: &Tables, principal: &Principal) -> Option<Vec<UserId>> {
    let admin = effective_admin(principal)?;
    let mut owners = vec![admin];
    if principal.role.is_admin() {
        owners.extend(
            tables
                .users
                .values()
                .filter(|u| u.role == Role::Employee && u.manager == Some(admin))
                .map(|u| u.id),
        );
    }
    Some(owners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn admin() -> Principal {
        Principal::new("Ana".to_string(), "ana".to_string(), Role::Admin, None)
    }

    fn employee_of(admin: &Principal) -> Principal {
        Principal::new("Bia".to_string(), "bia".to_string(), Role::Employee, Some(admin.id))
    }

    #[test]
    fn test_admin_is_its_own_effective_admin() {
        let a = admin();
        assert_eq!(effective_admin(&a), Some(a.id));
    }

    #[test]
    fn test_employee_resolves_to_manager() {
        let a = admin();
        let e = employee_of(&a);
        assert_eq!(effective_admin(&e), Some(a.id));
    }

    #[test]
    fn test_orphan_employee_has_no_scope() {
        let orphan =
            Principal::new("Solo".to_string(), "solo".to_string(), Role::Employee, None);
        assert_eq!(effective_admin(&orphan), None);
        assert!(ensure_owner(UserId::new(), &orphan, "record").is_err());
    }

    #[test]
    fn test_ensure_owner_accepts_matching_admin() {
        let a = admin();
        let e = employee_of(&a);
        assert_eq!(ensure_owner(a.id, &a, "record").unwrap(), a.id);
        assert_eq!(ensure_owner(a.id, &e, "record").unwrap(), a.id);
    }

    #[test]
    fn test_ensure_owner_rejects_foreign_admin() {
        let a = admin();
        let other = admin();
        let err = ensure_owner(a.id, &other, "access record").unwrap_err();
        assert!(matches!(err, ParkingError::Forbidden(_)));
        assert!(err.to_string().contains("access record"));
    }

    #[test]
    fn test_visible_owners_includes_managed_employees() {
        let a = admin();
        let e = employee_of(&a);
        let mut tables = Tables::default();
        tables.users.insert(a.id, a.clone());
        tables.users.insert(e.id, e.clone());

        let owners = visible_owners(&tables, &a).unwrap();
        assert!(owners.contains(&a.id));
        assert!(owners.contains(&e.id));

        // The employee only sees its admin's scope
        let owners = visible_owners(&tables, &e).unwrap();
        assert_eq!(owners, vec![a.id]);
    }
}
