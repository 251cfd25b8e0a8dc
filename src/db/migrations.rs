//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- FEEDINGS
        -- One row per recorded feeding
        -- ============================================
        CREATE TABLE feedings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,             -- local wall-clock: "2026-10-14T08:00:00"
            quantity REAL NOT NULL CHECK(quantity >= 0),
            unit TEXT NOT NULL,                  -- "ounce" or "milliliter"
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_feedings_timestamp ON feedings(timestamp);

        -- ============================================
        -- PREFERENCES
        -- Single row of user display settings
        -- ============================================
        CREATE TABLE preferences (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            display_unit TEXT NOT NULL DEFAULT 'ounce',
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        INSERT INTO preferences (id) VALUES (1);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(needs_migration(&conn).unwrap());

        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(!needs_migration(&conn).unwrap());

        let unit: String = conn
            .query_row("SELECT display_unit FROM preferences WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(unit, "ounce");
    }

    #[test]
    fn test_negative_quantity_rejected_by_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO feedings (timestamp, quantity, unit) VALUES ('2026-10-14T08:00:00', -1, 'ounce')",
            [],
        );
        assert!(result.is_err());
    }
}
