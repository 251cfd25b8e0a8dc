//! Feeding aggregation
//!
//! Day grouping, totals, progress points, and share summaries. Every function
//! here is pure: it reads an immutable snapshot plus an explicit display unit.

pub mod day_groups;
pub mod graph;
pub mod summary;

pub use day_groups::{day_total, grand_total, group, group_feedings, DayGroup, Grouping};
pub use graph::{cumulative_points, points_for_day, GraphPoint};
pub use summary::{format_day_heading, format_time, summarize};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDateTime;

    use crate::models::{parse_timestamp, Feeding};
    use crate::units::UnitOfMeasurement;

    pub fn at(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    pub fn feeding(id: i64, ts: &str, quantity: f64, unit: UnitOfMeasurement) -> Feeding {
        Feeding {
            id,
            timestamp: at(ts),
            quantity,
            unit,
        }
    }

    pub fn oz(id: i64, ts: &str, quantity: f64) -> Feeding {
        feeding(id, ts, quantity, UnitOfMeasurement::Ounce)
    }

    pub fn ml(id: i64, ts: &str, quantity: f64) -> Feeding {
        feeding(id, ts, quantity, UnitOfMeasurement::Milliliter)
    }
}
