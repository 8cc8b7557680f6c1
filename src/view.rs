//! Filtered, sorted view of the collection.
//!
//! The view is rebuilt from scratch whenever the records or the search term
//! change. At a few hundred records a full filter and sort is cheap, and it
//! keeps the view from drifting out of sync with the collection.

use chrono::{Datelike, NaiveDate};

use crate::record::InventoryRecord;
use crate::status::{Status, is_urgent};

/// A record in the view, annotated with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRecord<'a> {
    pub record: &'a InventoryRecord,
    pub status: Status,
}

impl<'a> VisibleRecord<'a> {
    pub fn new(record: &'a InventoryRecord) -> Self {
        Self {
            record,
            status: Status::from_days(record.days_remaining()),
        }
    }

    pub fn is_urgent(&self) -> bool {
        is_urgent(self.record.days_remaining())
    }
}

/// Case-insensitive substring match on the product name. An empty term
/// matches everything.
pub fn matches_search(record: &InventoryRecord, search: &str) -> bool {
    search.is_empty()
        || record
            .product_name()
            .to_lowercase()
            .contains(&search.to_lowercase())
}

/// Records matching `search`, soonest expiring first. Ties keep insertion
/// order.
pub fn visible<'a>(records: &'a [InventoryRecord], search: &str) -> Vec<VisibleRecord<'a>> {
    let mut view: Vec<VisibleRecord<'a>> = records
        .iter()
        .filter(|r| matches_search(r, search))
        .map(VisibleRecord::new)
        .collect();
    view.sort_by_key(|v| v.record.days_remaining());
    view
}

/// Short date as the es-AR locale prints it: `2/6/2026`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Integer with es-AR thousands grouping: `3120` becomes `3.120`.
pub fn format_quantity(quantity: u64) -> String {
    let digits = quantity.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BatchEntry;
    use chrono::NaiveDateTime;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Record whose days remaining come out as `days` at `now()`.
    fn record(name: &str, days: u32) -> InventoryRecord {
        let expiry = now().date() + chrono::Duration::days(i64::from(days) - 1);
        InventoryRecord::create(
            BatchEntry {
                quantity_per_unit: 1,
                unit_count: 1,
                product_name: name.to_string(),
                expiry_date: expiry,
            },
            now(),
        )
    }

    #[test]
    fn test_record_helper_days() {
        assert_eq!(record("a", 50).days_remaining(), 50);
        assert_eq!(record("a", 1).days_remaining(), 1);
    }

    #[test]
    fn test_sorted_by_days_remaining() {
        let records = vec![record("a", 50), record("b", 5), record("c", 20)];
        let days: Vec<u32> = visible(&records, "")
            .iter()
            .map(|v| v.record.days_remaining())
            .collect();
        assert_eq!(days, vec![5, 20, 50]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let records = vec![record("first", 10), record("second", 10), record("x", 3)];
        let names: Vec<&str> = visible(&records, "")
            .iter()
            .map(|v| v.record.product_name())
            .collect();
        assert_eq!(names, vec!["x", "first", "second"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![record("Speed Stick", 40), record("Agua", 40)];
        let view = visible(&records, "spe");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].record.product_name(), "Speed Stick");

        assert_eq!(visible(&records, "STICK").len(), 1);
        assert_eq!(visible(&records, "gu").len(), 1);
        assert!(visible(&records, "leche").is_empty());
    }

    #[test]
    fn test_empty_search_returns_all() {
        let records = vec![record("a", 1), record("b", 2)];
        assert_eq!(visible(&records, "").len(), 2);
    }

    #[test]
    fn test_annotates_status() {
        let records = vec![record("a", 21), record("b", 22), record("c", 61)];
        let statuses: Vec<Status> = visible(&records, "").iter().map(|v| v.status).collect();
        assert_eq!(
            statuses,
            vec![Status::Critical, Status::Upcoming, Status::Normal]
        );
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 2).unwrap();
        assert_eq!(format_date(date), "2/6/2026");
        let date = NaiveDate::from_ymd_opt(2026, 12, 14).unwrap();
        assert_eq!(format_date(date), "14/12/2026");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0), "0");
        assert_eq!(format_quantity(999), "999");
        assert_eq!(format_quantity(3120), "3.120");
        assert_eq!(format_quantity(1234567), "1.234.567");
    }
}
