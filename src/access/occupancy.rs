//! Occupancy counting
//!
//! A facility's occupancy is the number of its accesses with no exit
//! timestamp. The count is always derived from the access table at the moment
//! it is needed — there is no cached counter to go stale — and the entry path
//! evaluates it inside the same write-lock critical section as the insert, so
//! concurrent entries can never over-admit.

use crate::store::Tables;
use crate::types::FacilityId;

/// Number of currently open accesses for `facility`
pub(crate) fn open_count(tables: &Tables, facility: FacilityId) -> usize {
    tables
        .accesses
        .values()
        .filter(|access| access.facility == facility && access.is_open())
        .count()
}
