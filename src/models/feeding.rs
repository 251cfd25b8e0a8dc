//! Feeding model
//!
//! A single recorded feeding: when it happened, how much, and in which unit.

use chrono::NaiveDateTime;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{DbError, DbResult};
use crate::units::UnitOfMeasurement;

/// Storage format for feeding timestamps (local wall-clock, no offset)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepted input layouts, tried in order
const TIMESTAMP_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a local wall-clock timestamp
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    TIMESTAMP_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Validation errors for feeding input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedingError {
    #[error("Quantity must be zero or greater, got {0}")]
    NegativeQuantity(f64),

    #[error("Quantity must be a finite number")]
    NonFiniteQuantity,
}

/// A recorded feeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feeding {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub quantity: f64,
    pub unit: UnitOfMeasurement,
}

/// Data for creating or replacing a feeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingCreate {
    pub timestamp: NaiveDateTime,
    pub quantity: f64,
    pub unit: UnitOfMeasurement,
}

fn check_quantity(quantity: f64) -> Result<f64, FeedingError> {
    if !quantity.is_finite() {
        return Err(FeedingError::NonFiniteQuantity);
    }
    if quantity < 0.0 {
        return Err(FeedingError::NegativeQuantity(quantity));
    }
    Ok(quantity)
}

impl FeedingCreate {
    pub fn validate(&self) -> Result<(), FeedingError> {
        check_quantity(self.quantity).map(|_| ())
    }
}

/// A stored quantity column, whatever type SQLite kept it as
fn stored_quantity(value: ValueRef<'_>) -> Result<f64, String> {
    let quantity = match value {
        ValueRef::Real(q) => q,
        ValueRef::Integer(q) => q as f64,
        ValueRef::Null => return Err("missing quantity".to_string()),
        ValueRef::Text(raw) => {
            return Err(format!("non-numeric quantity '{}'", String::from_utf8_lossy(raw)))
        }
        ValueRef::Blob(_) => return Err("non-numeric quantity".to_string()),
    };
    check_quantity(quantity).map_err(|e| e.to_string())
}

/// A stored row that could not be read as a feeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidFeeding {
    pub id: i64,
    pub reason: String,
}

/// One row of the live feeding list
pub type FeedingRecord = Result<Feeding, InvalidFeeding>;

impl Feeding {
    /// Read a row, keeping a malformed timestamp, quantity or unit as an invalid record
    fn from_row(row: &Row) -> rusqlite::Result<FeedingRecord> {
        let id: i64 = row.get("id")?;
        let timestamp: Option<String> = row.get("timestamp")?;
        let quantity = stored_quantity(row.get_ref("quantity")?);
        let unit: Option<String> = row.get("unit")?;

        let timestamp = match timestamp.as_deref() {
            None => {
                return Ok(Err(InvalidFeeding {
                    id,
                    reason: "missing timestamp".to_string(),
                }))
            }
            Some(raw) => match parse_timestamp(raw) {
                Some(ts) => ts,
                None => {
                    return Ok(Err(InvalidFeeding {
                        id,
                        reason: format!("malformed timestamp '{}'", raw),
                    }))
                }
            },
        };

        let quantity = match quantity {
            Ok(quantity) => quantity,
            Err(reason) => return Ok(Err(InvalidFeeding { id, reason })),
        };

        let unit = match unit.as_deref().map(str::parse::<UnitOfMeasurement>) {
            Some(Ok(unit)) => unit,
            Some(Err(e)) => return Ok(Err(InvalidFeeding { id, reason: e.to_string() })),
            None => {
                return Ok(Err(InvalidFeeding {
                    id,
                    reason: "missing unit".to_string(),
                }))
            }
        };

        Ok(Ok(Self {
            id,
            timestamp,
            quantity,
            unit,
        }))
    }

    /// Calendar day of this feeding
    pub fn date(&self) -> chrono::NaiveDate {
        self.timestamp.date()
    }

    /// Create a new feeding
    pub fn create(conn: &Connection, data: &FeedingCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO feedings (timestamp, quantity, unit)
            VALUES (?1, ?2, ?3)
            "#,
            params![
                data.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                data.quantity,
                data.unit.to_db_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a feeding by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM feedings WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(Ok(feeding)) => Ok(Some(feeding)),
            Ok(Err(invalid)) => Err(DbError::InvalidRecord(format!(
                "feeding {}: {}",
                invalid.id, invalid.reason
            ))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every stored feeding, most recent first
    pub fn list(conn: &Connection) -> DbResult<Vec<FeedingRecord>> {
        let mut stmt = conn.prepare("SELECT * FROM feedings ORDER BY timestamp DESC, id DESC")?;

        let records = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Replace the contents of a feeding in place
    pub fn update(conn: &Connection, id: i64, data: &FeedingCreate) -> DbResult<Option<Self>> {
        let rows = conn.execute(
            r#"
            UPDATE feedings SET
                timestamp = ?1,
                quantity = ?2,
                unit = ?3,
                updated_at = datetime('now')
            WHERE id = ?4
            "#,
            params![
                data.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                data.quantity,
                data.unit.to_db_str(),
                id,
            ],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id)
    }

    /// Delete a feeding
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM feedings WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
