//! Parkgate
//!
//! Parking facility access lifecycle and fee calculation engine. The crate
//! manages vehicle entry/exit at parking facilities, prices sessions under
//! three regimes (tiered hourly, event flat-rate, multi-day), and enforces a
//! two-tier admin/employee access-control model over facilities, events,
//! accesses and users.
//!
//! # Overview
//!
//! A caller authenticates elsewhere and arrives here as a [`Principal`]. The
//! authorization policy resolves the admin scope the principal acts under;
//! the access engine consults the facility registry and occupancy counter on
//! entry, and the event catalog plus rate schedule on exit, producing an
//! [`Access`] record and — at exit — an immutable [`LedgerEntry`].
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{Duration, TimeZone, Utc};
//! use rust_decimal::Decimal;
//! use parkgate::clock::FixedClock;
//! use parkgate::{
//!     AccessEngine, FacilityRegistry, NewFacility, RateSchedule, Store, UserDirectory,
//! };
//!
//! # fn main() -> parkgate::ParkingResult<()> {
//! let store = Arc::new(Store::new());
//! let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()));
//!
//! let directory = UserDirectory::new(Arc::clone(&store));
//! let admin = directory.bootstrap_admin("Operator", "operator")?;
//!
//! let registry = FacilityRegistry::new(Arc::clone(&store));
//! let facility = registry.create(
//!     NewFacility {
//!         name: "Central Garage".to_string(),
//!         address: None,
//!         capacity: 100,
//!         rates: RateSchedule {
//!             first_hour: Decimal::new(1000, 2),
//!             additional_hour: Decimal::new(500, 2),
//!             daily: Decimal::new(5000, 2),
//!         },
//!     },
//!     &admin,
//! )?;
//!
//! let engine = AccessEngine::new(Arc::clone(&store), clock.clone());
//! let access = engine.register_entry("ABC1234", facility.id, &admin)?;
//!
//! clock.advance(Duration::minutes(150));
//! let closed = engine.register_exit(access.id, &admin)?;
//! assert_eq!(closed.total_fee, Some(Decimal::new(2000, 2)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module organization
//!
//! - [`types`]: identifiers, enumerations, configuration
//! - [`user`]: principals, account management, authorization policy
//! - [`facility`]: facility records and the registry
//! - [`event`]: flat-rate events and the overlap-checked catalog
//! - [`access`]: entry/exit engine, occupancy, fee calculation, ledger
//! - [`dashboard`]: per-facility overview aggregation
//! - [`store`], [`clock`], [`logging`], [`error`]: runtime plumbing

#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod access;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod facility;
pub mod logging;
pub mod store;
pub mod types;
pub mod user;

// Core types and identifiers
pub use types::{
    AccessId, AccessType, CliArgs, EventId, FacilityId, LedgerEntryId, Role, ScenarioConfig,
    UserId,
};

// Errors
pub use error::{ParkingError, ParkingResult};

// Runtime plumbing
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::LoggingConfig;
pub use store::Store;

// Principals and policy
pub use user::{NewUser, Principal, UserDirectory};

// Facilities
pub use facility::{Facility, FacilityRegistry, FacilityUpdate, NewFacility, RateSchedule};

// Events
pub use event::{Event, EventCatalog, EventUpdate, NewEvent};

// Access lifecycle and billing
pub use access::{Access, AccessEngine, FeeAssessment, LedgerEntry};

// Dashboard
pub use dashboard::{Dashboard, FacilityOverview, HourlyEntries, OverviewMetrics};
