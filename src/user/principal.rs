//! Principal records
//!
//! A principal is either an admin or an employee. Employees carry an explicit
//! `manager` reference to the admin that owns their work; the link is resolved
//! by lookup, never by walking a bidirectional object graph.

use crate::types::{Role, UserId};
use serde::{Deserialize, Serialize};

/// An authenticated account acting against the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Unique login handle
    pub login: String,
    /// Admin or employee
    pub role: Role,
    /// Managing admin for employees; always `None` for admins
    pub manager: Option<UserId>,
}

impl Principal {
    pub(crate) fn new(name: String, login: String, role: Role, manager: Option<UserId>) -> Self {
        Self { id: UserId::new(), name, login, role, manager }
    }
}

/// Input for creating a principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Unique login handle
    pub login: String,
    /// Role the new account will hold
    pub role: Role,
}

impl NewUser {
    pub(crate) fn validate(&self) -> Result<(), crate::error::ParkingError> {
        if self.name.trim().is_empty() {
            return Err(crate::error::ParkingError::validation("user name must not be empty"));
        }
        if self.login.trim().is_empty() {
            return Err(crate::error::ParkingError::validation("login must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_validation() {
        let ok = NewUser {
            name: "Dana".to_string(),
            login: "dana".to_string(),
            role: Role::Employee,
        };
        assert!(ok.validate().is_ok());

        let blank = NewUser { name: "  ".to_string(), login: "x".to_string(), role: Role::Admin };
        assert!(blank.validate().is_err());

        let no_login = NewUser { name: "Dana".to_string(), login: "".to_string(), role: Role::Admin };
        assert!(no_login.validate().is_err());
    }
}
