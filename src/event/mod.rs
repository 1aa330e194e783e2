//! Scheduled flat-rate events and the overlap-checked catalog

pub mod catalog;
pub mod model;

pub use catalog::{windows_overlap, EventCatalog};
pub use model::{Event, EventUpdate, NewEvent};
