//! Feeding MCP Tools
//!
//! Tools for logging, editing, and deleting individual feedings.

use serde::Serialize;

use crate::live::FeedingRepository;
use crate::models::{parse_timestamp, Feeding, FeedingCreate, TIMESTAMP_FORMAT};
use crate::units::{format_with_abbreviation, UnitOfMeasurement};

/// A feeding as returned by the tools
#[derive(Debug, Serialize)]
pub struct FeedingResponse {
    pub id: i64,
    pub timestamp: String,
    pub date: String,
    pub quantity: f64,
    pub unit: UnitOfMeasurement,
    pub display: String,
}

impl From<Feeding> for FeedingResponse {
    fn from(f: Feeding) -> Self {
        Self {
            id: f.id,
            timestamp: f.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            date: f.date().to_string(),
            quantity: f.quantity,
            unit: f.unit,
            display: format_with_abbreviation(f.quantity, f.unit),
        }
    }
}

/// Parse a unit argument. Unknown units are an error, never a default.
pub fn parse_unit(unit: &str) -> Result<UnitOfMeasurement, String> {
    unit.parse::<UnitOfMeasurement>().map_err(|e| e.to_string())
}

fn parse_input(timestamp: &str, quantity: f64, unit: &str) -> Result<FeedingCreate, String> {
    let timestamp = parse_timestamp(timestamp).ok_or_else(|| {
        format!("Invalid timestamp '{}': expected YYYY-MM-DDTHH:MM[:SS]", timestamp)
    })?;
    let data = FeedingCreate {
        timestamp,
        quantity,
        unit: parse_unit(unit)?,
    };
    data.validate().map_err(|e| e.to_string())?;
    Ok(data)
}

/// Record a new feeding
pub async fn log_feeding(
    repo: &dyn FeedingRepository,
    timestamp: &str,
    quantity: f64,
    unit: &str,
) -> Result<FeedingResponse, String> {
    let data = parse_input(timestamp, quantity, unit)?;
    let feeding = repo
        .save_feeding(data)
        .await
        .map_err(|e| format!("Failed to save feeding: {}", e))?;
    Ok(feeding.into())
}

/// Get a feeding by ID
pub async fn get_feeding(repo: &dyn FeedingRepository, id: i64) -> Result<Option<FeedingResponse>, String> {
    let feeding = repo
        .get_feeding(id)
        .await
        .map_err(|e| format!("Failed to get feeding: {}", e))?;
    Ok(feeding.map(FeedingResponse::from))
}

/// Replace a feeding's time, quantity, and unit
pub async fn update_feeding(
    repo: &dyn FeedingRepository,
    id: i64,
    timestamp: &str,
    quantity: f64,
    unit: &str,
) -> Result<Option<FeedingResponse>, String> {
    let data = parse_input(timestamp, quantity, unit)?;
    let feeding = repo
        .update_feeding(id, data)
        .await
        .map_err(|e| format!("Failed to update feeding: {}", e))?;
    Ok(feeding.map(FeedingResponse::from))
}

/// Delete a feeding
pub async fn delete_feeding(repo: &dyn FeedingRepository, id: i64) -> Result<bool, String> {
    repo.delete_feeding(id)
        .await
        .map_err(|e| format!("Failed to delete feeding: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::test_support::temp_database;
    use crate::live::SqliteFeedingRepository;

    #[tokio::test]
    async fn test_log_get_update_delete() {
        let (_dir, db) = temp_database();
        let repo = SqliteFeedingRepository::new(db).unwrap();

        let logged = log_feeding(&repo, "2026-10-14T08:00", 4.0, "oz").await.unwrap();
        assert_eq!(logged.timestamp, "2026-10-14T08:00:00");
        assert_eq!(logged.date, "2026-10-14");
        assert_eq!(logged.display, "4 oz");

        let fetched = get_feeding(&repo, logged.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, logged.id);

        let updated = update_feeding(&repo, logged.id, "2026-10-14 09:00", 120.0, "ml")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.unit, UnitOfMeasurement::Milliliter);
        assert_eq!(updated.display, "120 ml");

        assert!(delete_feeding(&repo, logged.id).await.unwrap());
        assert!(get_feeding(&repo, logged.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_bad_arguments() {
        let (_dir, db) = temp_database();
        let repo = SqliteFeedingRepository::new(db).unwrap();

        let err = log_feeding(&repo, "2026-10-14T08:00", 4.0, "cups").await.unwrap_err();
        assert!(err.contains("Unknown unit"));

        let err = log_feeding(&repo, "tomorrow", 4.0, "oz").await.unwrap_err();
        assert!(err.contains("Invalid timestamp"));

        let err = log_feeding(&repo, "2026-10-14T08:00", -2.0, "oz").await.unwrap_err();
        assert!(err.contains("zero or greater"));

        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_feeding() {
        let (_dir, db) = temp_database();
        let repo = SqliteFeedingRepository::new(db).unwrap();
        let result = update_feeding(&repo, 7, "2026-10-14T08:00", 1.0, "oz").await.unwrap();
        assert!(result.is_none());
    }
}
