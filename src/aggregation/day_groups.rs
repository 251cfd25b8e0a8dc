//! Day grouping
//!
//! Buckets feedings by calendar day. Days run most recent first; feedings
//! inside a day run chronologically, ties broken by ID.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Feeding, FeedingRecord, InvalidFeeding};
use crate::units::{convert, UnitOfMeasurement};

/// Feedings that share a calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub feedings: Vec<Feeding>,
}

impl DayGroup {
    /// An empty group for a date
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            feedings: Vec::new(),
        }
    }

    pub fn total(&self, display_unit: UnitOfMeasurement) -> f64 {
        day_total(self, display_unit)
    }

    pub fn is_empty(&self) -> bool {
        self.feedings.is_empty()
    }
}

/// Result of grouping a snapshot that may contain unreadable rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grouping {
    pub groups: Vec<DayGroup>,
    /// Rows left out of every group
    pub skipped: Vec<InvalidFeeding>,
}

impl Grouping {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Group for a specific date, if any feedings fall on it
    pub fn day(&self, date: NaiveDate) -> Option<&DayGroup> {
        self.groups.iter().find(|g| g.date == date)
    }
}

/// Chronological order with ID as the tie-break
pub(crate) fn chronological(a: &Feeding, b: &Feeding) -> Ordering {
    a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id))
}

/// Group a live snapshot, isolating invalid records instead of failing the pass
pub fn group(records: &[FeedingRecord]) -> Grouping {
    let mut valid = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for record in records {
        match record {
            Ok(feeding) => valid.push(feeding.clone()),
            Err(invalid) => {
                tracing::warn!(id = invalid.id, reason = %invalid.reason, "skipping unreadable feeding");
                skipped.push(invalid.clone());
            }
        }
    }

    Grouping {
        groups: group_feedings(&valid),
        skipped,
    }
}

/// Group valid feedings by calendar day
pub fn group_feedings(feedings: &[Feeding]) -> Vec<DayGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Feeding>> = BTreeMap::new();
    for feeding in feedings {
        by_date.entry(feeding.date()).or_default().push(feeding.clone());
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, mut feedings)| {
            feedings.sort_by(chronological);
            DayGroup { date, feedings }
        })
        .collect()
}

/// Sum of a day's feedings in the display unit
pub fn day_total(group: &DayGroup, display_unit: UnitOfMeasurement) -> f64 {
    grand_total(&group.feedings, display_unit)
}

/// Sum of any set of feedings in the display unit
pub fn grand_total(feedings: &[Feeding], display_unit: UnitOfMeasurement) -> f64 {
    feedings
        .iter()
        .map(|f| convert(f.quantity, f.unit, display_unit))
        .sum()
}
