//! Core enumerations shared across the crate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a principal in the two-tier access-control model
///
/// Admins own facilities, events and accesses; employees act within the scope
/// of the admin that manages them. The closed enum replaces the free-text role
/// checks the system historically relied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Account owner; can manage facilities, events and users
    Admin,
    /// Operator managed by an admin; limited to that admin's records
    Employee,
}

impl Role {
    /// Whether this role carries administrative rights
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

/// Pricing regime applied to a parking session
///
/// Set at entry (`Hourly`, or `Event` when an event window covers the entry
/// instant) and possibly revised at exit: stays above 24 hours reclassify to
/// `Daily`, and an event access whose event lost its flat fee falls back to
/// timed pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Tiered hourly billing (first hour + additional hours)
    Hourly,
    /// Flat fee taken from the covering event
    Event,
    /// Daily billing for stays longer than 24 hours
    Daily,
}

impl AccessType {
    /// Stable lowercase tag used in serialized records
    pub fn as_str(self) -> &'static str {
        match self {
            AccessType::Hourly => "hourly",
            AccessType::Event => "event",
            AccessType::Daily => "daily",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
