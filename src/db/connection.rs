//! Database handle
//!
//! A pooled SQLite file that knows where it lives and which schema it holds.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use super::migrations::{get_schema_version, run_migrations, SCHEMA_VERSION};

/// Connections kept open per database file
const POOL_SIZE: u32 = 4;

/// Database error types
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    #[error("Database schema v{found} is newer than this build supports (v{supported})")]
    NewerSchema { found: i32, supported: i32 },
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Pooled handle to the feedings database file
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    path: Arc<PathBuf>,
}

impl Database {
    /// Open the file at `path` and migrate it to the current schema
    ///
    /// A file already past [`SCHEMA_VERSION`] is left untouched and rejected.
    pub fn open_migrated<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref().to_path_buf();
        let manager = SqliteConnectionManager::file(&path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(|conn| {
                conn.execute_batch(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = 5000;",
                )
            });
        let pool = Pool::builder().max_size(POOL_SIZE).build(manager)?;

        let database = Self {
            pool,
            path: Arc::new(path),
        };
        database.with_conn(|conn| {
            let found = get_schema_version(conn)?;
            if found > SCHEMA_VERSION {
                return Err(DbError::NewerSchema {
                    found,
                    supported: SCHEMA_VERSION,
                });
            }
            run_migrations(conn)
        })?;

        tracing::debug!(path = %database.path.display(), "database opened");
        Ok(database)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes on disk, counting the write-ahead log
    pub fn file_size(&self) -> Option<u64> {
        let main = std::fs::metadata(self.path.as_path()).ok()?.len();
        let mut wal = self.path.as_os_str().to_owned();
        wal.push("-wal");
        let wal = std::fs::metadata(PathBuf::from(wal)).map(|m| m.len()).unwrap_or(0);
        Some(main + wal)
    }

    pub fn schema_version(&self) -> DbResult<i32> {
        self.with_conn(get_schema_version)
    }

    /// Execute a closure with a pooled connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.pool.get()?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_and_migrates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedme.db");

        let database = Database::open_migrated(&path).unwrap();
        assert_eq!(database.path(), path.as_path());
        assert_eq!(database.schema_version().unwrap(), SCHEMA_VERSION);
        assert!(database.file_size().unwrap() > 0);

        // reopening an up-to-date file is a no-op
        drop(database);
        let reopened = Database::open_migrated(&path).unwrap();
        assert_eq!(reopened.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedme.db");
        {
            let database = Database::open_migrated(&path).unwrap();
            database
                .with_conn(|conn| {
                    conn.execute(
                        "INSERT INTO schema_migrations (version) VALUES (?1)",
                        [SCHEMA_VERSION + 1],
                    )?;
                    Ok(())
                })
                .unwrap();
        }

        match Database::open_migrated(&path) {
            Err(DbError::NewerSchema { found, supported }) => {
                assert_eq!(found, SCHEMA_VERSION + 1);
                assert_eq!(supported, SCHEMA_VERSION);
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("newer schema was accepted"),
        }
    }

    #[test]
    fn test_missing_file_has_no_size() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::open_migrated(dir.path().join("feedme.db")).unwrap();
        std::fs::remove_dir_all(dir.path()).unwrap();
        assert_eq!(database.file_size(), None);
    }
}
