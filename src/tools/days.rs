//! Day MCP Tools
//!
//! Grouped history, day totals, share summaries, and progress points. All of
//! these read one feeding snapshot and an explicit display unit.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregation::{
    cumulative_points, format_day_heading, format_time, grand_total, group, summarize, DayGroup,
    GraphPoint,
};
use crate::models::{Feeding, FeedingRecord, Preferences};
use crate::units::{convert, format_with_abbreviation, UnitOfMeasurement};

use super::feedings::parse_unit;

/// A feeding line within a day, shown in the display unit
#[derive(Debug, Serialize)]
pub struct FeedingLine {
    pub id: i64,
    pub time: String,
    pub quantity: f64,
    pub display: String,
    pub recorded_quantity: f64,
    pub recorded_unit: UnitOfMeasurement,
}

/// One day of history
#[derive(Debug, Serialize)]
pub struct DayListing {
    pub date: String,
    pub heading: String,
    pub total: f64,
    pub total_formatted: String,
    pub feedings: Vec<FeedingLine>,
}

/// Response for list_days
#[derive(Debug, Serialize)]
pub struct ListDaysResponse {
    pub display_unit: UnitOfMeasurement,
    pub days: Vec<DayListing>,
    pub total_days: usize,
    pub skipped_records: usize,
}

/// Response for get_day_summary
#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub date: String,
    pub display_unit: UnitOfMeasurement,
    pub feeding_count: usize,
    pub total: f64,
    pub summary: String,
}

/// Response for get_progress_points
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub display_unit: UnitOfMeasurement,
    pub date: Option<String>,
    pub points: Vec<GraphPoint>,
    pub total: f64,
    pub total_formatted: String,
}

/// Display unit from an explicit override, else the stored preference
pub fn resolve_unit(unit: Option<&str>, preferences: &Preferences) -> Result<UnitOfMeasurement, String> {
    match unit {
        Some(u) => parse_unit(u),
        None => Ok(preferences.display_unit),
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", date))
}

fn valid_feedings(snapshot: &[FeedingRecord]) -> Vec<Feeding> {
    snapshot.iter().filter_map(|r| r.as_ref().ok().cloned()).collect()
}

fn listing(group: DayGroup, unit: UnitOfMeasurement, use_24_hour_clock: bool) -> DayListing {
    let total = group.total(unit);
    let feedings = group
        .feedings
        .iter()
        .map(|f| {
            let quantity = convert(f.quantity, f.unit, unit);
            FeedingLine {
                id: f.id,
                time: format_time(f.timestamp, use_24_hour_clock),
                quantity,
                display: format_with_abbreviation(quantity, unit),
                recorded_quantity: f.quantity,
                recorded_unit: f.unit,
            }
        })
        .collect();

    DayListing {
        date: group.date.to_string(),
        heading: format_day_heading(group.date),
        total,
        total_formatted: format_with_abbreviation(total, unit),
        feedings,
    }
}

/// List days, most recent first
pub fn list_days(
    snapshot: &[FeedingRecord],
    display_unit: UnitOfMeasurement,
    use_24_hour_clock: bool,
    limit: usize,
) -> ListDaysResponse {
    let limit = limit.clamp(1, 365);
    let grouping = group(snapshot);
    let total_days = grouping.groups.len();

    let days = grouping
        .groups
        .into_iter()
        .take(limit)
        .map(|g| listing(g, display_unit, use_24_hour_clock))
        .collect();

    ListDaysResponse {
        display_unit,
        days,
        total_days,
        skipped_records: grouping.skipped.len(),
    }
}

/// Share text for one date; a date with no feedings yields a zero total
pub fn day_summary(
    snapshot: &[FeedingRecord],
    date: &str,
    use_24_hour_clock: bool,
    display_unit: UnitOfMeasurement,
) -> Result<DaySummaryResponse, String> {
    let date = parse_date(date)?;
    let day = group(snapshot)
        .groups
        .into_iter()
        .find(|g| g.date == date)
        .unwrap_or_else(|| DayGroup::empty(date));

    Ok(DaySummaryResponse {
        date: date.to_string(),
        display_unit,
        feeding_count: day.feedings.len(),
        total: day.total(display_unit),
        summary: summarize(&day, use_24_hour_clock, display_unit),
    })
}

/// Cumulative progress points, optionally for a single date
pub fn progress_points(
    snapshot: &[FeedingRecord],
    date: Option<&str>,
    display_unit: UnitOfMeasurement,
) -> Result<ProgressResponse, String> {
    let mut feedings = valid_feedings(snapshot);
    let date = date.map(parse_date).transpose()?;
    if let Some(date) = date {
        feedings.retain(|f| f.date() == date);
    }

    let points: Vec<GraphPoint> = cumulative_points(&feedings, display_unit).collect();
    let total = grand_total(&feedings, display_unit);

    Ok(ProgressResponse {
        display_unit,
        date: date.map(|d| d.to_string()),
        points,
        total,
        total_formatted: format_with_abbreviation(total, display_unit),
    })
}
