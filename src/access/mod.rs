//! The access lifecycle: entry, occupancy, fee calculation and exit

pub mod engine;
pub mod fee;
pub mod occupancy;
pub mod record;

pub use engine::AccessEngine;
pub use fee::{flat_fee, round_currency, timed_fee, FeeAssessment};
pub use record::{Access, LedgerEntry};
