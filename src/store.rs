//! In-process record store
//!
//! All tables live behind one reader-writer lock. Mutating operations run as
//! a single closure under the write guard, which makes every check-then-write
//! sequence (capacity check + insert, already-closed check + close + ledger
//! post) atomic without row or table locks. That is stronger than the
//! per-facility serialization the engine needs and is valid because the store
//! is only ever reached from within this process.
//!
//! Tables are `BTreeMap`s keyed by entity id, so iteration — and therefore
//! every listing — is deterministically ordered by ascending id.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::access::{Access, LedgerEntry};
use crate::event::Event;
use crate::facility::Facility;
use crate::types::{AccessId, EventId, FacilityId, LedgerEntryId, UserId};
use crate::user::Principal;

/// The record tables, visible to engine internals as one snapshot
#[derive(Debug, Default)]
pub struct Tables {
    /// Principals by id
    pub users: BTreeMap<UserId, Principal>,
    /// Facilities by id
    pub facilities: BTreeMap<FacilityId, Facility>,
    /// Events by id
    pub events: BTreeMap<EventId, Event>,
    /// Accesses by id
    pub accesses: BTreeMap<AccessId, Access>,
    /// Billing ledger by id
    pub ledger: BTreeMap<LedgerEntryId, LedgerEntry>,
}

/// Shared handle to the record tables
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a read snapshot of the tables
    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        f(&tables)
    }

    /// Run `f` with exclusive access to the tables
    ///
    /// The closure is the transaction boundary: validations and mutations
    /// inside it are observed atomically by every other caller.
    pub fn write<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        f(&mut tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_store_starts_empty() {
        let store = Store::new();
        store.read(|t| {
            assert!(t.users.is_empty());
            assert!(t.facilities.is_empty());
            assert!(t.events.is_empty());
            assert!(t.accesses.is_empty());
            assert!(t.ledger.is_empty());
        });
    }

    #[test]
    fn test_writes_are_visible_to_reads() {
        let store = Store::new();
        let user = Principal::new("Ana".to_string(), "ana".to_string(), Role::Admin, None);
        let id = user.id;
        store.write(|t| {
            t.users.insert(id, user);
        });
        let found = store.read(|t| t.users.get(&id).cloned());
        assert_eq!(found.unwrap().login, "ana");
    }

    #[test]
    fn test_tables_iterate_in_ascending_id_order() {
        use uuid::Uuid;

        let store = Store::new();
        store.write(|t| {
            for raw in [9_u128, 1, 5] {
                let mut user =
                    Principal::new("U".to_string(), format!("u{raw}"), Role::Admin, None);
                user.id = UserId(Uuid::from_u128(raw));
                t.users.insert(user.id, user);
            }
        });
        let ids = store.read(|t| t.users.keys().copied().collect::<Vec<_>>());
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
