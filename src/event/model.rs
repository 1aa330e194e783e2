//! Event records
//!
//! An event is a scheduled `[start, end)` window on a facility, optionally
//! carrying a flat entry fee that overrides hourly billing for accesses that
//! enter while the window is active.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{EventId, FacilityId, UserId};
use crate::{ParkingError, ParkingResult};

/// A scheduled flat-rate window on a facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Event name, unique per owning admin
    pub name: String,
    /// Facility the event applies to
    pub facility: FacilityId,
    /// Inclusive start of the window
    pub starts_at: DateTime<Utc>,
    /// Exclusive end of the window
    pub ends_at: DateTime<Utc>,
    /// Flat entry fee; `None` means the event no longer overrides pricing
    pub flat_fee: Option<Decimal>,
    /// Owning admin
    pub owner: UserId,
}

impl Event {
    /// Whether `instant` falls inside the `[starts_at, ends_at)` window
    pub fn is_active_at(&self, instant: DateTime<Utc>) -> bool {
        self.starts_at <= instant && instant < self.ends_at
    }
}

/// Input for creating an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    /// Event name, unique per owning admin
    pub name: String,
    /// Facility the event applies to
    pub facility: FacilityId,
    /// Inclusive start of the window
    pub starts_at: DateTime<Utc>,
    /// Exclusive end of the window
    pub ends_at: DateTime<Utc>,
    /// Flat entry fee, if the event overrides pricing
    #[serde(default)]
    pub flat_fee: Option<Decimal>,
}

impl NewEvent {
    pub(crate) fn validate(&self) -> ParkingResult<()> {
        if self.name.trim().is_empty() {
            return Err(ParkingError::validation("event name must not be empty"));
        }
        validate_window(self.starts_at, self.ends_at)?;
        validate_flat_fee(self.flat_fee)
    }

    pub(crate) fn into_event(self, owner: UserId) -> Event {
        Event {
            id: EventId::new(),
            name: self.name,
            facility: self.facility,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            flat_fee: self.flat_fee,
            owner,
        }
    }
}

/// Field-allowlist update for an event; unset fields are left untouched
///
/// `flat_fee` distinguishes "leave as is" (`None`) from "clear the fee"
/// (`Some(None)`), so an event can stop overriding pricing without being
/// deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    /// New event name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New window start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    /// New window end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    /// Replace (`Some(Some(_))`) or clear (`Some(None)`) the flat fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_fee: Option<Option<Decimal>>,
}

impl EventUpdate {
    /// Whether the update moves the event's time window
    pub(crate) fn changes_window(&self) -> bool {
        self.starts_at.is_some() || self.ends_at.is_some()
    }

    /// Apply the set fields onto `event`, validating the resulting state
    pub(crate) fn apply(&self, event: &mut Event) -> ParkingResult<()> {
        let mut updated = event.clone();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ParkingError::validation("event name must not be empty"));
            }
            updated.name = name.clone();
        }
        if let Some(starts_at) = self.starts_at {
            updated.starts_at = starts_at;
        }
        if let Some(ends_at) = self.ends_at {
            updated.ends_at = ends_at;
        }
        if let Some(flat_fee) = self.flat_fee {
            validate_flat_fee(flat_fee)?;
            updated.flat_fee = flat_fee;
        }
        validate_window(updated.starts_at, updated.ends_at)?;
        *event = updated;
        Ok(())
    }
}

fn validate_window(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> ParkingResult<()> {
    if ends_at <= starts_at {
        return Err(ParkingError::validation("event window must end after it starts"));
    }
    Ok(())
}

fn validate_flat_fee(flat_fee: Option<Decimal>) -> ParkingResult<()> {
    if let Some(fee) = flat_fee {
        if fee.is_sign_negative() {
            return Err(ParkingError::validation("flat fee must not be negative"));
        }
    }
    Ok(())
}
