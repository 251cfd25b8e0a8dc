//! Day summaries
//!
//! Plain-text rendering of one day's feedings, handed to whatever share
//! action the host platform provides.

use chrono::{NaiveDate, NaiveDateTime};

use super::day_groups::{chronological, day_total, DayGroup};
use crate::units::{convert, format_with_abbreviation, UnitOfMeasurement};

/// Clock time for a feeding, e.g. "8:00 AM" or "08:00"
pub fn format_time(timestamp: NaiveDateTime, use_24_hour_clock: bool) -> String {
    if use_24_hour_clock {
        timestamp.format("%H:%M").to_string()
    } else {
        timestamp.format("%-I:%M %p").to_string()
    }
}

/// Section heading for a day, e.g. "Wednesday, October 14, 2026"
pub fn format_day_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Render a day as one line per feeding followed by a total line
///
/// Lines run oldest first whatever order the group holds its feedings in.
///
/// ```text
/// 8:00 AM - 4 oz
/// 12:00 PM - 4.06 oz
/// Total: 8.06 oz
/// ```
pub fn summarize(group: &DayGroup, use_24_hour_clock: bool, display_unit: UnitOfMeasurement) -> String {
    let mut ordered: Vec<_> = group.feedings.iter().collect();
    ordered.sort_by(|a, b| chronological(a, b));

    let mut lines: Vec<String> = ordered
        .into_iter()
        .map(|f| {
            format!(
                "{} - {}",
                format_time(f.timestamp, use_24_hour_clock),
                format_with_abbreviation(convert(f.quantity, f.unit, display_unit), display_unit)
            )
        })
        .collect();

    lines.push(format!(
        "Total: {}",
        format_with_abbreviation(day_total(group, display_unit), display_unit)
    ));

    lines.join("\n")
}
