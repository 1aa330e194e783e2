//! Access and ledger records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AccessId, AccessType, EventId, FacilityId, LedgerEntryId, UserId};

/// One vehicle's parking session
///
/// Created open at entry (no exit timestamp, no fee) and closed exactly once
/// at exit registration, which fixes the exit timestamp, the final access
/// type and the fee. A closed access is terminal and never mutated again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Access {
    /// Unique identifier
    pub id: AccessId,
    /// Vehicle plate as presented at the gate
    pub plate: String,
    /// Facility the vehicle entered
    pub facility: FacilityId,
    /// Entry instant
    pub entered_at: DateTime<Utc>,
    /// Exit instant; `None` while the vehicle is parked
    pub exited_at: Option<DateTime<Utc>>,
    /// Total fee, set only at exit and rounded to two decimals
    pub total_fee: Option<Decimal>,
    /// Pricing regime; may be revised at exit
    pub access_type: AccessType,
    /// Event covering the entry instant, if any
    pub event: Option<EventId>,
    /// Admin that authorized the entry; immutable thereafter
    pub owner: UserId,
}

impl Access {
    pub(crate) fn open(
        plate: String,
        facility: FacilityId,
        entered_at: DateTime<Utc>,
        access_type: AccessType,
        event: Option<EventId>,
        owner: UserId,
    ) -> Self {
        Self {
            id: AccessId::new(),
            plate,
            facility,
            entered_at,
            exited_at: None,
            total_fee: None,
            access_type,
            event,
            owner,
        }
    }

    /// Whether the vehicle is still parked
    pub fn is_open(&self) -> bool {
        self.exited_at.is_none()
    }
}

/// An immutable billing record, posted once per closed access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: LedgerEntryId,
    /// The access this entry bills
    pub access: AccessId,
    /// Billed amount, equal to the access's total fee
    pub amount: Decimal,
    /// Posting instant, equal to the access's exit timestamp
    pub posted_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub(crate) fn post(access: AccessId, amount: Decimal, posted_at: DateTime<Utc>) -> Self {
        Self { id: LedgerEntryId::new(), access, amount, posted_at }
    }
}
