//! Preferences model
//!
//! The user's display settings, stored as a single row.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::units::UnitOfMeasurement;

/// User display preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub display_unit: UnitOfMeasurement,
}

impl Preferences {
    /// Load the stored preferences, falling back to defaults when the row is absent
    pub fn get(conn: &Connection) -> DbResult<Self> {
        let result = conn.query_row(
            "SELECT display_unit FROM preferences WHERE id = 1",
            [],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(raw) => {
                let display_unit = raw
                    .parse::<UnitOfMeasurement>()
                    .map_err(|e| DbError::InvalidRecord(format!("preferences: {}", e)))?;
                Ok(Self { display_unit })
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a new display unit
    pub fn set_display_unit(conn: &Connection, unit: UnitOfMeasurement) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO preferences (id, display_unit) VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET
                display_unit = excluded.display_unit,
                updated_at = datetime('now')
            "#,
            params![unit.to_db_str()],
        )?;
        Self::get(conn)
    }
}
