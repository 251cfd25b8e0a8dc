//! FeedMe Status Tool
//!
//! Provides runtime status information about the FeedMe service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::Database;
use crate::models::{FeedingRecord, Preferences};
use crate::units::UnitOfMeasurement;

/// Feeding logging instructions for AI assistants
pub const FEEDING_INSTRUCTIONS: &str = r#"
# FeedMe Logging Instructions

## Logging a feeding

Call `log_feeding` with:
- `timestamp`: local wall-clock time, `YYYY-MM-DDTHH:MM` (seconds optional). No timezone.
- `quantity`: zero or greater.
- `unit`: `oz` or `ml`. Anything else is rejected.

Record the quantity in the unit the caregiver used. Conversion happens at display time.

## Reviewing history

- `list_days` returns days most recent first, feedings within a day oldest first,
  with each day's total in the display unit.
- `get_day_summary` returns plain text for one date, ready to share.
- `get_progress_points` returns the running total used for the progress graph;
  pass `date` for a single day.

## Display unit

`get_preferences` / `set_display_unit` control the unit totals are shown in.
Every day tool also accepts an optional `unit` override for one call.

## Corrections

- Wrong amount or time: `update_feeding` with the feeding's `id`.
- Logged by mistake: `delete_feeding`.
"#;

/// Runtime status of the FeedMe service
#[derive(Debug, Clone, Serialize)]
pub struct FeedMeStatus {
    pub build: BuildInfo,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub database_schema_version: Option<i32>,
    pub feeding_count: usize,
    pub unreadable_records: usize,
    pub display_unit: UnitOfMeasurement,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database: Database,
}

impl StatusTracker {
    pub fn new(database: Database) -> Self {
        Self {
            start_time: Instant::now(),
            database,
        }
    }

    /// Get the current status
    pub fn get_status(&self, snapshot: &[FeedingRecord], preferences: &Preferences) -> FeedMeStatus {
        let database_schema_version = match self.database.schema_version() {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!(error = %e, "could not read schema version");
                None
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        let unreadable_records = snapshot.iter().filter(|r| r.is_err()).count();

        FeedMeStatus {
            build: BuildInfo::current(),
            database_path: self.database.path().display().to_string(),
            database_size_bytes: self.database.file_size(),
            database_schema_version,
            feeding_count: snapshot.len() - unreadable_records,
            unreadable_records,
            display_unit: preferences.display_unit,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::SCHEMA_VERSION;
    use crate::live::test_support::temp_database;
    use crate::models::InvalidFeeding;

    #[test]
    fn test_status_counts_records() {
        let (_dir, database) = temp_database();
        let tracker = StatusTracker::new(database);
        let snapshot: Vec<FeedingRecord> = vec![Err(InvalidFeeding {
            id: 1,
            reason: "missing timestamp".to_string(),
        })];
        let preferences = Preferences {
            display_unit: UnitOfMeasurement::Milliliter,
        };

        let status = tracker.get_status(&snapshot, &preferences);
        assert_eq!(status.feeding_count, 0);
        assert_eq!(status.unreadable_records, 1);
        assert_eq!(status.database_schema_version, Some(SCHEMA_VERSION));
        assert_eq!(status.build.schema_version, SCHEMA_VERSION);
        assert!(status.database_size_bytes.is_some());
        assert_eq!(status.display_unit, UnitOfMeasurement::Milliliter);
        assert_eq!(status.process_id, std::process::id());
    }
}
