//! Cumulative progress points
//!
//! Running totals across a feeding set for the progress graph.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::day_groups::chronological;
use crate::models::Feeding;
use crate::units::{convert, UnitOfMeasurement};

/// Running total at the moment of one feeding
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Running totals for every feeding, in timestamp order
///
/// Sorting happens up front; conversion and summing happen as the iterator is
/// consumed. Calling again with the same input yields the same points.
pub fn cumulative_points(
    feedings: &[Feeding],
    display_unit: UnitOfMeasurement,
) -> impl Iterator<Item = GraphPoint> + '_ {
    let mut ordered: Vec<&Feeding> = feedings.iter().collect();
    ordered.sort_by(|a, b| chronological(a, b));

    ordered.into_iter().scan(0.0, move |total, feeding| {
        *total += convert(feeding.quantity, feeding.unit, display_unit);
        Some(GraphPoint {
            timestamp: feeding.timestamp,
            value: *total,
        })
    })
}

/// Running totals restricted to one calendar day
pub fn points_for_day(
    feedings: &[Feeding],
    date: NaiveDate,
    display_unit: UnitOfMeasurement,
) -> Vec<GraphPoint> {
    let day: Vec<Feeding> = feedings.iter().filter(|f| f.date() == date).cloned().collect();
    cumulative_points(&day, display_unit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::day_groups::grand_total;
    use crate::aggregation::fixtures::{at, ml, oz};

    fn sample() -> Vec<Feeding> {
        vec![
            oz(4, "2026-10-14T16:00", 2.0),
            ml(2, "2026-10-13T12:00", 120.0),
            oz(1, "2026-10-14T08:00", 4.0),
            oz(3, "2026-10-14T08:00", 0.0),
            ml(5, "2026-10-12T23:00", 60.0),
        ]
    }

    #[test]
    fn test_empty_input_has_no_points() {
        assert_eq!(cumulative_points(&[], UnitOfMeasurement::Ounce).count(), 0);
    }

    #[test]
    fn test_points_ordered_across_whole_set() {
        let input = sample();
        let points: Vec<GraphPoint> = cumulative_points(&input, UnitOfMeasurement::Ounce).collect();
        let times: Vec<NaiveDateTime> = points.iter().map(|p| p.timestamp).collect();
        assert_eq!(
            times,
            vec![
                at("2026-10-12T23:00"),
                at("2026-10-13T12:00"),
                at("2026-10-14T08:00"),
                at("2026-10-14T08:00"),
                at("2026-10-14T16:00"),
            ]
        );
    }

    #[test]
    fn test_non_decreasing_and_ends_at_total() {
        let input = sample();
        for unit in UnitOfMeasurement::ALL {
            let points: Vec<GraphPoint> = cumulative_points(&input, unit).collect();
            assert!(points.windows(2).all(|w| w[0].value <= w[1].value));
            let last = points.last().unwrap().value;
            assert!((last - grand_total(&input, unit)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_restartable() {
        let input = sample();
        let first: Vec<GraphPoint> = cumulative_points(&input, UnitOfMeasurement::Milliliter).collect();
        let second: Vec<GraphPoint> = cumulative_points(&input, UnitOfMeasurement::Milliliter).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_quantity_adds_nothing() {
        let input = vec![oz(1, "2026-10-14T08:00", 3.0), oz(2, "2026-10-14T09:00", 0.0)];
        let points: Vec<GraphPoint> = cumulative_points(&input, UnitOfMeasurement::Ounce).collect();
        assert_eq!(points[0].value, points[1].value);
    }

    #[test]
    fn test_points_for_day() {
        let input = sample();
        let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let points = points_for_day(&input, date, UnitOfMeasurement::Ounce);
        assert_eq!(points.len(), 3);
        assert_eq!(points.last().unwrap().value, 6.0);

        let empty = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(points_for_day(&input, empty, UnitOfMeasurement::Ounce).is_empty());
    }
}
