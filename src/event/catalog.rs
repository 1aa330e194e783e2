//! Event catalog
//!
//! Creation-time overlap checking is what lets the entry path assume at most
//! one active event per facility and owner. Two `[start, end)` windows
//! overlap iff each starts before the other ends; the catalog rejects any
//! event that would overlap an existing one for the same facility and owner,
//! naming the colliding event in the error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::event::{Event, EventUpdate, NewEvent};
use crate::store::{Store, Tables};
use crate::types::{EventId, FacilityId, UserId};
use crate::user::policy;
use crate::user::Principal;
use crate::{ParkingError, ParkingResult};

/// Whether `[s1, e1)` and `[s2, e2)` share any instant
pub fn windows_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Event whose window contains `at`, for the given facility and owner
///
/// Overlap prevention means at most one event can match; if inconsistent
/// data ever produces several, the lowest id wins deterministically (table
/// iteration is id-ordered).
pub(crate) fn active_event_at(
    tables: &Tables,
    facility: FacilityId,
    owner: UserId,
    at: DateTime<Utc>,
) -> Option<&Event> {
    tables
        .events
        .values()
        .find(|event| event.facility == facility && event.owner == owner && event.is_active_at(at))
}

/// First event overlapping `[starts_at, ends_at)` for the facility and owner
fn overlapping<'t>(
    tables: &'t Tables,
    facility: FacilityId,
    owner: UserId,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    exclude: Option<EventId>,
) -> Option<&'t Event> {
    tables.events.values().find(|event| {
        event.facility == facility
            && event.owner == owner
            && Some(event.id) != exclude
            && windows_overlap(event.starts_at, event.ends_at, starts_at, ends_at)
    })
}

/// Scheduled-event management with overlap enforcement
#[derive(Debug, Clone)]
pub struct EventCatalog {
    store: Arc<Store>,
}

impl EventCatalog {
    /// Create a catalog over `store`
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create an event; admin-only
    ///
    /// Fails with `Conflict` when the window overlaps an existing event for
    /// the same facility and owner, or when the owner already has an event
    /// with the same name.
    pub fn create(&self, new: NewEvent, principal: &Principal) -> ParkingResult<Event> {
        if !principal.role.is_admin() {
            return Err(ParkingError::forbidden("only admins can create events"));
        }
        new.validate()?;

        let created = self.store.write(|tables| {
            let facility = tables
                .facilities
                .get(&new.facility)
                .ok_or_else(|| ParkingError::not_found("facility"))?;
            let owner = policy::ensure_owner(facility.owner, principal, "facility")?;

            if tables
                .events
                .values()
                .any(|event| event.owner == owner && event.name == new.name)
            {
                return Err(ParkingError::conflict(format!(
                    "an event named '{}' already exists",
                    new.name
                )));
            }

            if let Some(existing) =
                overlapping(tables, new.facility, owner, new.starts_at, new.ends_at, None)
            {
                return Err(ParkingError::conflict(format!(
                    "time conflict with event '{}'",
                    existing.name
                )));
            }

            let event = new.into_event(owner);
            tables.events.insert(event.id, event.clone());
            Ok(event)
        })?;

        info!(event_id = %created.id, name = %created.name, facility = %created.facility, "event created");
        Ok(created)
    }

    /// Fetch one event, enforcing record-level visibility
    pub fn get(&self, event_id: EventId, principal: &Principal) -> ParkingResult<Event> {
        self.store.read(|tables| {
            let event = tables
                .events
                .get(&event_id)
                .ok_or_else(|| ParkingError::not_found("event"))?;
            policy::ensure_owner(event.owner, principal, "event")?;
            Ok(event.clone())
        })
    }

    /// List events visible to `principal`, ordered by ascending id
    pub fn list(&self, principal: &Principal) -> Vec<Event> {
        self.store.read(|tables| {
            let Some(owners) = policy::visible_owners(tables, principal) else {
                return Vec::new();
            };
            tables
                .events
                .values()
                .filter(|event| owners.contains(&event.owner))
                .cloned()
                .collect()
        })
    }

    /// Apply an allowlist update to an event
    ///
    /// A window change re-runs the overlap check against the owner's other
    /// events on the same facility, so updates cannot smuggle in a conflict
    /// that creation would have rejected.
    pub fn update(
        &self,
        event_id: EventId,
        update: EventUpdate,
        principal: &Principal,
    ) -> ParkingResult<Event> {
        self.store.write(|tables| {
            let event = tables
                .events
                .get(&event_id)
                .ok_or_else(|| ParkingError::not_found("event"))?;
            let owner = policy::ensure_owner(event.owner, principal, "event")?;

            let mut updated = event.clone();
            update.apply(&mut updated)?;

            if let Some(name) = &update.name {
                if tables
                    .events
                    .values()
                    .any(|other| other.id != event_id && other.owner == owner && &other.name == name)
                {
                    return Err(ParkingError::conflict(format!(
                        "an event named '{name}' already exists"
                    )));
                }
            }

            if update.changes_window() {
                if let Some(existing) = overlapping(
                    tables,
                    updated.facility,
                    owner,
                    updated.starts_at,
                    updated.ends_at,
                    Some(event_id),
                ) {
                    return Err(ParkingError::conflict(format!(
                        "time conflict with event '{}'",
                        existing.name
                    )));
                }
            }

            tables.events.insert(event_id, updated.clone());
            Ok(updated)
        })
    }

    /// Delete an event
    ///
    /// Accesses that entered under this event keep their reference; their
    /// exit falls back to timed pricing once the event is gone.
    pub fn delete(&self, event_id: EventId, principal: &Principal) -> ParkingResult<()> {
        self.store.write(|tables| {
            let event = tables
                .events
                .get(&event_id)
                .ok_or_else(|| ParkingError::not_found("event"))?;
            policy::ensure_owner(event.owner, principal, "event")?;
            tables.events.remove(&event_id);
            Ok(())
        })
    }
}
