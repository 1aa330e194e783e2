//! Facility records and rate schedules

use crate::types::{FacilityId, UserId};
use crate::{ParkingError, ParkingResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Three-tier pricing applied to timed parking
///
/// All amounts are fixed-point currency values; the fee engine rounds results
/// half-up to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Charge for the first hour (also the minimum charge for any stay)
    pub first_hour: Decimal,
    /// Charge per additional started hour beyond the first
    pub additional_hour: Decimal,
    /// Charge per full 24-hour block for stays longer than a day
    pub daily: Decimal,
}

impl RateSchedule {
    pub(crate) fn validate(&self) -> ParkingResult<()> {
        for (label, amount) in [
            ("first-hour", self.first_hour),
            ("additional-hour", self.additional_hour),
            ("daily", self.daily),
        ] {
            if amount.is_sign_negative() {
                return Err(ParkingError::validation(format!(
                    "{label} rate must not be negative"
                )));
            }
        }
        Ok(())
    }
}

/// A parking lot with a fixed number of spaces and a rate schedule
///
/// Capacity and rates are set by admins through the registry; the access
/// engine reads them but never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    /// Unique identifier
    pub id: FacilityId,
    /// Unique facility name
    pub name: String,
    /// Street address, if recorded
    pub address: Option<String>,
    /// Total number of spaces
    pub capacity: u32,
    /// Pricing for timed parking
    pub rates: RateSchedule,
    /// Owning admin
    pub owner: UserId,
}

/// Input for creating a facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFacility {
    /// Unique facility name
    pub name: String,
    /// Street address, if any
    #[serde(default)]
    pub address: Option<String>,
    /// Total number of spaces
    pub capacity: u32,
    /// Pricing for timed parking
    pub rates: RateSchedule,
}

impl NewFacility {
    pub(crate) fn validate(&self) -> ParkingResult<()> {
        if self.name.trim().is_empty() {
            return Err(ParkingError::validation("facility name must not be empty"));
        }
        self.rates.validate()
    }

    pub(crate) fn into_facility(self, owner: UserId) -> Facility {
        Facility {
            id: FacilityId::new(),
            name: self.name,
            address: self.address,
            capacity: self.capacity,
            rates: self.rates,
            owner,
        }
    }
}

/// Field-allowlist update for a facility; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityUpdate {
    /// New facility name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// New first-hour rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_hour: Option<Decimal>,
    /// New additional-hour rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_hour: Option<Decimal>,
    /// New daily rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<Decimal>,
}

impl FacilityUpdate {
    /// Apply the set fields onto `facility`, validating the resulting state
    pub(crate) fn apply(&self, facility: &mut Facility) -> ParkingResult<()> {
        let mut updated = facility.clone();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ParkingError::validation("facility name must not be empty"));
            }
            updated.name = name.clone();
        }
        if let Some(address) = &self.address {
            updated.address = Some(address.clone());
        }
        if let Some(capacity) = self.capacity {
            updated.capacity = capacity;
        }
        if let Some(first_hour) = self.first_hour {
            updated.rates.first_hour = first_hour;
        }
        if let Some(additional_hour) = self.additional_hour {
            updated.rates.additional_hour = additional_hour;
        }
        if let Some(daily) = self.daily {
            updated.rates.daily = daily;
        }
        updated.rates.validate()?;
        *facility = updated;
        Ok(())
    }
}
