//! History projection
//!
//! The list screen's derived state, rebuilt from scratch for every feeding
//! snapshot or preference change.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::repository::Snapshot;
use crate::aggregation::{cumulative_points, format_day_heading, group, GraphPoint};
use crate::models::{Feeding, FeedingRecord, Preferences};
use crate::units::{format_with_abbreviation, UnitOfMeasurement};

/// One day of the history list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySection {
    pub date: NaiveDate,
    pub heading: String,
    pub total: f64,
    pub total_formatted: String,
    pub feedings: Vec<Feeding>,
}

/// Everything the history screen renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryView {
    pub display_unit: UnitOfMeasurement,
    pub days: Vec<DaySection>,
    pub points: Vec<GraphPoint>,
    pub skipped_records: usize,
}

impl HistoryView {
    pub fn compute(records: &[FeedingRecord], preferences: &Preferences) -> Self {
        let unit = preferences.display_unit;
        let grouping = group(records);

        let days = grouping
            .groups
            .into_iter()
            .map(|g| {
                let total = g.total(unit);
                DaySection {
                    date: g.date,
                    heading: format_day_heading(g.date),
                    total,
                    total_formatted: format_with_abbreviation(total, unit),
                    feedings: g.feedings,
                }
            })
            .collect();

        let valid: Vec<Feeding> = records.iter().filter_map(|r| r.as_ref().ok().cloned()).collect();
        let points = cumulative_points(&valid, unit).collect();

        Self {
            display_unit: unit,
            days,
            points,
            skipped_records: grouping.skipped.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Keep a [`HistoryView`] current with the feeding and preference channels
///
/// The task ends when the feeding channel closes or every view receiver is
/// dropped. A closed preference channel freezes the display unit.
pub fn spawn_projection(
    mut feedings: watch::Receiver<Snapshot>,
    mut preferences: watch::Receiver<Preferences>,
) -> (watch::Receiver<Arc<HistoryView>>, JoinHandle<()>) {
    let initial = {
        let snapshot = feedings.borrow_and_update().clone();
        let prefs = *preferences.borrow_and_update();
        HistoryView::compute(&snapshot, &prefs)
    };
    let (sender, receiver) = watch::channel(Arc::new(initial));

    let handle = tokio::spawn(async move {
        let mut preferences_open = true;
        loop {
            tokio::select! {
                changed = feedings.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = preferences.changed(), if preferences_open => {
                    if changed.is_err() {
                        preferences_open = false;
                        continue;
                    }
                }
            }

            let snapshot = feedings.borrow_and_update().clone();
            let prefs = *preferences.borrow_and_update();
            let view = HistoryView::compute(&snapshot, &prefs);
            tracing::debug!(
                days = view.days.len(),
                points = view.points.len(),
                skipped = view.skipped_records,
                "history recomputed"
            );

            if sender.send(Arc::new(view)).is_err() {
                break;
            }
        }
    });

    (receiver, handle)
}
