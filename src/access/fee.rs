//! Fee calculation
//!
//! Timed parking is billed in started hours. Stays of up to 24 hours use the
//! hourly tier: the first hour at the first-hour rate, every further started
//! hour at the additional-hour rate. Stays longer than 24 hours switch to the
//! daily tier: each full 24-hour block at the daily rate, with the remaining
//! started hours billed like a fresh hourly stay. Event accesses bypass timed
//! pricing entirely and pay the event's flat fee.
//!
//! All amounts are rounded half-up to two decimal places at computation time,
//! not at serialization.

use chrono::Duration;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::facility::RateSchedule;
use crate::types::AccessType;

const MILLIS_PER_HOUR: i64 = 3_600_000;
const HOURS_PER_DAY: i64 = 24;

/// Outcome of pricing a parking session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeAssessment {
    /// Final pricing regime for the session
    pub access_type: AccessType,
    /// Amount owed, rounded to two decimals
    pub amount: Decimal,
}

/// Round a currency amount half-up to two decimal places
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price a flat-fee (event) session
pub fn flat_fee(amount: Decimal) -> FeeAssessment {
    FeeAssessment { access_type: AccessType::Event, amount: round_currency(amount) }
}

/// Price a timed session of length `parked`
///
/// A stay of up to one hour — including a degenerate non-positive duration —
/// charges exactly the first-hour rate. Exactly 24 hours still bills on the
/// hourly tier; only durations strictly beyond 24 hours reclassify to daily.
pub fn timed_fee(rates: &RateSchedule, parked: Duration) -> FeeAssessment {
    let millis = parked.num_milliseconds();

    if millis <= HOURS_PER_DAY * MILLIS_PER_HOUR {
        let hours = started_hours(millis);
        let amount = rates.first_hour + Decimal::from(hours - 1) * rates.additional_hour;
        FeeAssessment { access_type: AccessType::Hourly, amount: round_currency(amount) }
    } else {
        let hours = started_hours(millis);
        let full_days = hours / HOURS_PER_DAY;
        let remainder_hours = hours % HOURS_PER_DAY;

        let mut amount = Decimal::from(full_days) * rates.daily;
        if remainder_hours >= 1 {
            amount += rates.first_hour;
        }
        if remainder_hours > 1 {
            amount += Decimal::from(remainder_hours - 1) * rates.additional_hour;
        }
        FeeAssessment { access_type: AccessType::Daily, amount: round_currency(amount) }
    }
}

/// Number of started hours in `millis`, never less than one
fn started_hours(millis: i64) -> i64 {
    if millis <= MILLIS_PER_HOUR {
        1
    } else {
        (millis + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR
    }
}
