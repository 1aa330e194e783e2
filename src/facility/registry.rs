//! Facility registry
//!
//! Admin-managed facility records. The access engine reads capacity and rates
//! straight from the store inside its own transaction, so there is no cached
//! copy to go stale between concurrent entry attempts.

use std::sync::Arc;

use tracing::info;

use crate::facility::{Facility, FacilityUpdate, NewFacility};
use crate::store::Store;
use crate::types::FacilityId;
use crate::user::policy;
use crate::user::Principal;
use crate::{ParkingError, ParkingResult};

/// Facility record management
#[derive(Debug, Clone)]
pub struct FacilityRegistry {
    store: Arc<Store>,
}

impl FacilityRegistry {
    /// Create a registry over `store`
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create a facility; admin-only, names are unique
    pub fn create(&self, new: NewFacility, principal: &Principal) -> ParkingResult<Facility> {
        if !principal.role.is_admin() {
            return Err(ParkingError::forbidden("only admins can create facilities"));
        }
        new.validate()?;
        let owner = policy::effective_admin(principal)
            .ok_or_else(|| ParkingError::forbidden("principal has no admin scope"))?;

        let created = self.store.write(|tables| {
            if tables.facilities.values().any(|facility| facility.name == new.name) {
                return Err(ParkingError::conflict(format!(
                    "a facility named '{}' already exists",
                    new.name
                )));
            }
            let facility = new.into_facility(owner);
            tables.facilities.insert(facility.id, facility.clone());
            Ok(facility)
        })?;

        info!(facility_id = %created.id, name = %created.name, capacity = created.capacity, "facility created");
        Ok(created)
    }

    /// Fetch one facility, enforcing record-level visibility
    pub fn get(&self, facility_id: FacilityId, principal: &Principal) -> ParkingResult<Facility> {
        self.store.read(|tables| {
            let facility = tables
                .facilities
                .get(&facility_id)
                .ok_or_else(|| ParkingError::not_found("facility"))?;
            policy::ensure_owner(facility.owner, principal, "facility")?;
            Ok(facility.clone())
        })
    }

    /// List facilities visible to `principal`, ordered by ascending id
    pub fn list(&self, principal: &Principal) -> Vec<Facility> {
        self.store.read(|tables| {
            let Some(owners) = policy::visible_owners(tables, principal) else {
                return Vec::new();
            };
            tables
                .facilities
                .values()
                .filter(|facility| owners.contains(&facility.owner))
                .cloned()
                .collect()
        })
    }

    /// Apply an allowlist update to a facility; admin-only
    pub fn update(
        &self,
        facility_id: FacilityId,
        update: FacilityUpdate,
        principal: &Principal,
    ) -> ParkingResult<Facility> {
        if !principal.role.is_admin() {
            return Err(ParkingError::forbidden("only admins can update facilities"));
        }
        self.store.write(|tables| {
            let facility = tables
                .facilities
                .get_mut(&facility_id)
                .ok_or_else(|| ParkingError::not_found("facility"))?;
            policy::ensure_owner(facility.owner, principal, "facility")?;
            update.apply(facility)?;
            Ok(facility.clone())
        })
    }

    /// Delete a facility; admin-only
    pub fn delete(&self, facility_id: FacilityId, principal: &Principal) -> ParkingResult<()> {
        if !principal.role.is_admin() {
            return Err(ParkingError::forbidden("only admins can delete facilities"));
        }
        self.store.write(|tables| {
            let facility = tables
                .facilities
                .get(&facility_id)
                .ok_or_else(|| ParkingError::not_found("facility"))?;
            policy::ensure_owner(facility.owner, principal, "facility")?;
            tables.facilities.remove(&facility_id);
            Ok(())
        })
    }
}
