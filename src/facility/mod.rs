//! Facilities: parking lots with a capacity and a rate schedule

pub mod model;
pub mod registry;

pub use model::{Facility, FacilityUpdate, NewFacility, RateSchedule};
pub use registry::FacilityRegistry;
