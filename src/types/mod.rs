//! Core types, identifiers and configuration
//!
//! This module contains the identifier newtypes, shared enumerations and the
//! runtime configuration used across the crate.

pub mod config;
pub mod enums;
pub mod identifiers;

pub use config::{CliArgs, ScenarioConfig};
pub use enums::{AccessType, Role};
pub use identifiers::{AccessId, EventId, FacilityId, LedgerEntryId, UserId};
