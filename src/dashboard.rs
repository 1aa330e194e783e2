//! Facility overview aggregation
//!
//! Read-only metrics for a single facility: live occupancy, today's entries,
//! exits and posted revenue, the occupancy swing against yesterday, and a
//! 24-bucket histogram of today's entries by hour. Day boundaries are UTC
//! calendar days; local-time presentation is the caller's concern.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::access::occupancy;
use crate::clock::Clock;
use crate::store::Store;
use crate::types::FacilityId;
use crate::user::policy;
use crate::user::Principal;
use crate::{ParkingError, ParkingResult};

/// Headline numbers for a facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewMetrics {
    /// Vehicles currently parked
    pub occupied: usize,
    /// Total spaces
    pub capacity: u32,
    /// Net occupancy swing today vs yesterday, in percent
    pub occupancy_change_pct: f64,
    /// Entries registered today
    pub entries_today: usize,
    /// Exits registered today
    pub exits_today: usize,
    /// Ledger amounts posted today
    pub revenue_today: Decimal,
}

/// Entries registered during one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEntries {
    /// Hour of day, 0–23
    pub hour: u32,
    /// Entries registered within that hour
    pub entries: usize,
}

/// Full overview payload for a facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityOverview {
    /// Headline numbers
    pub metrics: OverviewMetrics,
    /// Today's entries bucketed by hour, all 24 buckets present
    pub entries_by_hour: Vec<HourlyEntries>,
}

/// Per-facility dashboard aggregation
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    /// Create a dashboard over `store`, taking "today" from `clock`
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Compute the overview for one facility, enforcing ownership
    pub fn overview(
        &self,
        facility_id: FacilityId,
        principal: &Principal,
    ) -> ParkingResult<FacilityOverview> {
        let today = self.clock.now().date_naive();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

        self.store.read(|tables| {
            let facility = tables
                .facilities
                .get(&facility_id)
                .ok_or_else(|| ParkingError::not_found("facility"))?;
            policy::ensure_owner(facility.owner, principal, "facility")?;

            let occupied = occupancy::open_count(tables, facility_id);

            let accesses =
                || tables.accesses.values().filter(|access| access.facility == facility_id);

            let entered_on = |day: NaiveDate| {
                accesses().filter(|access| access.entered_at.date_naive() == day).count()
            };
            let exited_on = |day: NaiveDate| {
                accesses()
                    .filter(|access| {
                        access.exited_at.is_some_and(|exit| exit.date_naive() == day)
                    })
                    .count()
            };

            let entries_today = entered_on(today);
            let exits_today = exited_on(today);

            let revenue_today: Decimal = tables
                .ledger
                .values()
                .filter(|entry| {
                    entry.posted_at.date_naive() == today
                        && tables
                            .accesses
                            .get(&entry.access)
                            .is_some_and(|access| access.facility == facility_id)
                })
                .map(|entry| entry.amount)
                .sum();

            let today_delta = entries_today as i64 - exits_today as i64;
            let yesterday_delta = entered_on(yesterday) as i64 - exited_on(yesterday) as i64;
            let occupancy_change_pct = if yesterday_delta != 0 {
                let pct =
                    (today_delta - yesterday_delta) as f64 / yesterday_delta.abs() as f64 * 100.0;
                (pct * 100.0).round() / 100.0
            } else {
                0.0
            };

            let mut buckets = [0usize; 24];
            for access in accesses().filter(|access| access.entered_at.date_naive() == today) {
                buckets[access.entered_at.hour() as usize] += 1;
            }
            let entries_by_hour = buckets
                .iter()
                .enumerate()
                .map(|(hour, &entries)| HourlyEntries { hour: hour as u32, entries })
                .collect();

            Ok(FacilityOverview {
                metrics: OverviewMetrics {
                    occupied,
                    capacity: facility.capacity,
                    occupancy_change_pct,
                    entries_today,
                    exits_today,
                    revenue_today,
                },
                entries_by_hour,
            })
        })
    }
}
