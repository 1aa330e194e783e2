//! User directory
//!
//! Admin-driven account management. Employees created by an admin are
//! attached to that admin; the link is what the authorization policy resolves
//! when an employee acts on records.

use std::sync::Arc;

use tracing::info;

use crate::store::Store;
use crate::types::{Role, UserId};
use crate::user::policy;
use crate::user::{NewUser, Principal};
use crate::{ParkingError, ParkingResult};

/// Principal record management
#[derive(Debug, Clone)]
pub struct UserDirectory {
    store: Arc<Store>,
}

impl UserDirectory {
    /// Create a directory over `store`
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create the first admin account for a fresh deployment
    ///
    /// Provisioning hook: it requires no acting principal and is the only way
    /// to mint an account without one. Logins stay unique.
    pub fn bootstrap_admin(
        &self,
        name: impl Into<String>,
        login: impl Into<String>,
    ) -> ParkingResult<Principal> {
        let new = NewUser { name: name.into(), login: login.into(), role: Role::Admin };
        new.validate()?;
        self.store.write(|tables| {
            if tables.users.values().any(|user| user.login == new.login) {
                return Err(ParkingError::conflict(format!(
                    "login '{}' is already taken",
                    new.login
                )));
            }
            let admin = Principal::new(new.name, new.login, Role::Admin, None);
            tables.users.insert(admin.id, admin.clone());
            Ok(admin)
        })
    }

    /// Create an account; admin-only
    ///
    /// A new employee is attached to the creating admin. A new admin stands
    /// on its own with no manager.
    pub fn create(&self, new: NewUser, principal: &Principal) -> ParkingResult<Principal> {
        if !principal.role.is_admin() {
            return Err(ParkingError::forbidden("only admins can create users"));
        }
        new.validate()?;

        let manager = match new.role {
            Role::Employee => Some(principal.id),
            Role::Admin => None,
        };

        let created = self.store.write(|tables| {
            if tables.users.values().any(|user| user.login == new.login) {
                return Err(ParkingError::conflict(format!(
                    "login '{}' is already taken",
                    new.login
                )));
            }
            let user = Principal::new(new.name, new.login, new.role, manager);
            tables.users.insert(user.id, user.clone());
            Ok(user)
        })?;

        info!(user_id = %created.id, login = %created.login, role = %created.role, "user created");
        Ok(created)
    }

    /// Fetch one account
    ///
    /// A principal always sees itself; an admin additionally sees the
    /// employees it manages.
    pub fn get(&self, user_id: UserId, principal: &Principal) -> ParkingResult<Principal> {
        self.store.read(|tables| {
            let user = tables
                .users
                .get(&user_id)
                .ok_or_else(|| ParkingError::not_found("user"))?;
            let visible = user.id == principal.id
                || (principal.role.is_admin() && user.manager == Some(principal.id));
            if !visible {
                return Err(ParkingError::forbidden("no permission to access this user"));
            }
            Ok(user.clone())
        })
    }

    /// List accounts visible to `principal`, ordered by ascending id
    ///
    /// Admins see themselves and their employees; employees see only
    /// themselves.
    pub fn list(&self, principal: &Principal) -> Vec<Principal> {
        self.store.read(|tables| {
            tables
                .users
                .values()
                .filter(|user| {
                    user.id == principal.id
                        || (principal.role.is_admin() && user.manager == Some(principal.id))
                })
                .cloned()
                .collect()
        })
    }

    /// Resolve the admin scope of a principal, if it has one
    pub fn effective_admin(&self, principal: &Principal) -> Option<UserId> {
        policy::effective_admin(principal)
    }
}
