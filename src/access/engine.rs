//! Access lifecycle engine
//!
//! Orchestrates entry registration (ownership check, capacity check, event
//! detection, record creation) and exit registration (duration computation,
//! tier selection, fee calculation, ledger posting). Each access moves
//! through exactly two states: open at entry, closed at exit, with the close
//! terminal.
//!
//! Both registration paths validate everything before mutating anything and
//! run their check-then-write sequence inside a single store transaction, so
//! no caller ever observes a partially applied entry or exit.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::access::fee;
use crate::access::occupancy;
use crate::access::{Access, LedgerEntry};
use crate::clock::Clock;
use crate::event::catalog::active_event_at;
use crate::store::Store;
use crate::types::{AccessId, AccessType, FacilityId};
use crate::user::policy;
use crate::user::Principal;
use crate::{ParkingError, ParkingResult};

/// Entry/exit registration and access retrieval
#[derive(Debug, Clone)]
pub struct AccessEngine {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl AccessEngine {
    /// Create an engine over `store`, taking timestamps from `clock`
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Register a vehicle entering a facility
    ///
    /// The capacity check and the insert happen atomically: two concurrent
    /// entries can never both pass the check and push occupancy over
    /// capacity. If an event window covers the entry instant the access is
    /// tagged event-priced, otherwise it starts hourly. No fee is computed at
    /// entry.
    pub fn register_entry(
        &self,
        plate: &str,
        facility_id: FacilityId,
        principal: &Principal,
    ) -> ParkingResult<Access> {
        let plate = plate.trim();
        if plate.is_empty() {
            return Err(ParkingError::validation("vehicle plate must not be empty"));
        }

        let now = self.clock.now();
        let created = self.store.write(|tables| {
            let facility = tables
                .facilities
                .get(&facility_id)
                .ok_or_else(|| ParkingError::not_found("facility"))?;
            let admin = policy::ensure_owner(facility.owner, principal, "facility")?;

            let occupied = occupancy::open_count(tables, facility_id);
            if occupied >= facility.capacity as usize {
                warn!(%facility_id, occupied, capacity = facility.capacity, "entry rejected, facility full");
                return Err(ParkingError::CapacityExceeded(facility_id));
            }

            let (access_type, event) = match active_event_at(tables, facility_id, admin, now) {
                Some(event) => (AccessType::Event, Some(event.id)),
                None => (AccessType::Hourly, None),
            };

            let access =
                Access::open(plate.to_string(), facility_id, now, access_type, event, admin);
            tables.accesses.insert(access.id, access.clone());
            Ok(access)
        })?;

        info!(
            access_id = %created.id,
            %facility_id,
            plate = %created.plate,
            access_type = %created.access_type,
            "entry registered"
        );
        Ok(created)
    }

    /// Register a vehicle leaving, computing its fee and posting the bill
    ///
    /// Fee selection at exit:
    /// - an event access whose event still carries a flat fee pays that fee;
    /// - an event access whose event was deleted or lost its fee falls back
    ///   to timed pricing and is reclassified accordingly;
    /// - timed pricing bills started hours up to 24 hours, and reclassifies
    ///   to daily beyond that.
    ///
    /// Closing the access and posting the ledger entry happen in the same
    /// store transaction; a second exit call always fails with
    /// `AlreadyClosed` and never alters the first result.
    pub fn register_exit(
        &self,
        access_id: AccessId,
        principal: &Principal,
    ) -> ParkingResult<Access> {
        let now = self.clock.now();
        let closed = self.store.write(|tables| {
            let access = tables
                .accesses
                .get(&access_id)
                .ok_or_else(|| ParkingError::not_found("access"))?;
            policy::ensure_owner(access.owner, principal, "access record")?;
            if access.exited_at.is_some() {
                return Err(ParkingError::AlreadyClosed(access_id));
            }

            let facility = tables
                .facilities
                .get(&access.facility)
                .ok_or_else(|| ParkingError::not_found("facility for this access"))?;
            let rates = facility.rates;

            let parked = now - access.entered_at;
            let assessment = match (access.access_type, access.event) {
                (AccessType::Event, Some(event_id)) => {
                    match tables.events.get(&event_id).and_then(|event| event.flat_fee) {
                        Some(amount) => fee::flat_fee(amount),
                        // Event deleted or fee cleared since entry: bill as a
                        // timed stay and reclassify.
                        None => {
                            debug!(%access_id, %event_id, "event fee unavailable, falling back to timed pricing");
                            fee::timed_fee(&rates, parked)
                        }
                    }
                }
                _ => fee::timed_fee(&rates, parked),
            };

            let access = tables
                .accesses
                .get_mut(&access_id)
                .ok_or_else(|| ParkingError::internal("access row vanished mid-transaction"))?;
            access.exited_at = Some(now);
            access.total_fee = Some(assessment.amount);
            access.access_type = assessment.access_type;
            let closed = access.clone();

            let posting = LedgerEntry::post(access_id, assessment.amount, now);
            tables.ledger.insert(posting.id, posting);
            Ok(closed)
        })?;

        info!(
            %access_id,
            fee = %closed.total_fee.unwrap_or_default(),
            access_type = %closed.access_type,
            "exit registered"
        );
        Ok(closed)
    }

    /// Fetch one access, enforcing record-level visibility
    pub fn get(&self, access_id: AccessId, principal: &Principal) -> ParkingResult<Access> {
        self.store.read(|tables| {
            let access = tables
                .accesses
                .get(&access_id)
                .ok_or_else(|| ParkingError::not_found("access"))?;
            policy::ensure_owner(access.owner, principal, "access record")?;
            Ok(access.clone())
        })
    }

    /// List accesses visible to `principal`, ordered by ascending id
    ///
    /// An employee without an assigned admin gets an empty list, not an
    /// error.
    pub fn list(&self, principal: &Principal) -> Vec<Access> {
        self.store.read(|tables| {
            let Some(owners) = policy::visible_owners(tables, principal) else {
                return Vec::new();
            };
            tables
                .accesses
                .values()
                .filter(|access| owners.contains(&access.owner))
                .cloned()
                .collect()
        })
    }

    /// List ledger entries for accesses visible to `principal`, ascending id
    pub fn ledger_entries(&self, principal: &Principal) -> Vec<LedgerEntry> {
        self.store.read(|tables| {
            let Some(owners) = policy::visible_owners(tables, principal) else {
                return Vec::new();
            };
            tables
                .ledger
                .values()
                .filter(|entry| {
                    tables
                        .accesses
                        .get(&entry.access)
                        .is_some_and(|access| owners.contains(&access.owner))
                })
                .cloned()
                .collect()
        })
    }

    /// Current open-access count for a facility
    pub fn open_count(&self, facility_id: FacilityId) -> usize {
        self.store.read(|tables| occupancy::open_count(tables, facility_id))
    }
}
