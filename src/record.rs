//! Inventory record model and day arithmetic.
//!
//! A record is created once from a parsed batch entry and never changes
//! afterwards; an "update" is a delete followed by a fresh add.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 86_400_000;

/// Two-digit years are read as `2000 + YY`.
pub const CENTURY: i32 = 2000;

/// One line of pasted input after grammar matching, before it is stamped
/// with an id and the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub quantity_per_unit: u32,
    pub unit_count: u32,
    pub product_name: String,
    pub expiry_date: NaiveDate,
}

impl BatchEntry {
    pub fn total_quantity(&self) -> u64 {
        u64::from(self.quantity_per_unit) * u64::from(self.unit_count)
    }
}

/// One parsed batch entry in the persisted collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    id: Uuid,
    quantity_per_unit: u32,
    unit_count: u32,
    total_quantity: u64,
    product_name: String,
    expiry_date: NaiveDate,
    days_remaining: u32,
    created_at: NaiveDateTime,
}

impl InventoryRecord {
    /// Stamp a batch entry with a fresh id, its creation time and the days
    /// left until its expiry as seen from `now`.
    pub fn create(entry: BatchEntry, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            quantity_per_unit: entry.quantity_per_unit,
            unit_count: entry.unit_count,
            total_quantity: entry.total_quantity(),
            days_remaining: days_remaining(entry.expiry_date, now),
            product_name: entry.product_name,
            expiry_date: entry.expiry_date,
            created_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quantity_per_unit(&self) -> u32 {
        self.quantity_per_unit
    }

    pub fn unit_count(&self) -> u32 {
        self.unit_count
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Last instant of the expiry date.
    pub fn expires_at(&self) -> NaiveDateTime {
        end_of_day(self.expiry_date)
    }

    /// Days left at creation time, never negative.
    pub fn days_remaining(&self) -> u32 {
        self.days_remaining
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}

/// The last millisecond of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::milliseconds(DAY_MILLIS - 1)
}

/// Whole days from `now` to the end of `expiry`, rounded up and floored at
/// zero. A batch expiring today reports 1 until midnight, then 0.
pub fn days_remaining(expiry: NaiveDate, now: NaiveDateTime) -> u32 {
    let millis = (end_of_day(expiry) - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    let days = (millis + DAY_MILLIS - 1) / DAY_MILLIS;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Build a date from day, month and two-digit year, rolling out-of-range
/// days and months over into neighbouring months the way a calendar
/// constructor does: day 31 of February lands in March, day 0 is the last
/// day of the previous month, month 13 is January of the next year.
pub fn calendar_date(day: u32, month: u32, short_year: u32) -> Option<NaiveDate> {
    let month_index = i32::try_from(month).ok()? - 1;
    let year = CENTURY + i32::try_from(short_year).ok()? + month_index.div_euclid(12);
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(Duration::days(i64::from(day) - 1))
}
