//! Feeding repository
//!
//! Async CRUD over feedings plus a watch channel of full snapshots.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::Connection;
use thiserror::Error;
use tokio::sync::{watch, Mutex};

use crate::db::{Database, DbError, DbResult};
use crate::models::{Feeding, FeedingCreate, FeedingError, FeedingRecord};

/// Every stored feeding row at one moment, most recent first
pub type Snapshot = Arc<Vec<FeedingRecord>>;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Invalid(#[from] FeedingError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for feedings
#[async_trait]
pub trait FeedingRepository: Send + Sync {
    async fn get_feeding(&self, id: i64) -> StoreResult<Option<Feeding>>;

    async fn save_feeding(&self, data: FeedingCreate) -> StoreResult<Feeding>;

    /// Replace a feeding's contents, keeping its ID
    async fn update_feeding(&self, id: i64, data: FeedingCreate) -> StoreResult<Option<Feeding>>;

    async fn delete_feeding(&self, id: i64) -> StoreResult<bool>;

    /// Subscribe to the live list; the current snapshot is available immediately
    fn feedings(&self) -> watch::Receiver<Snapshot>;
}

/// Run a database closure on the blocking thread pool
pub(crate) async fn run_blocking<F, T>(database: &Database, f: F) -> StoreResult<T>
where
    F: FnOnce(&Connection) -> DbResult<T> + Send + 'static,
    T: Send + 'static,
{
    let database = database.clone();
    Ok(tokio::task::spawn_blocking(move || database.with_conn(f)).await??)
}

/// SQLite-backed repository
pub struct SqliteFeedingRepository {
    database: Database,
    snapshots: watch::Sender<Snapshot>,
    // Held from a write until its snapshot is published, so snapshots go out in write order
    writes: Mutex<()>,
}

impl SqliteFeedingRepository {
    /// Load the initial snapshot and start publishing
    pub fn new(database: Database) -> StoreResult<Self> {
        let initial = database.with_conn(Feeding::list)?;
        tracing::info!(rows = initial.len(), "loaded feedings");
        let (snapshots, _) = watch::channel(Arc::new(initial));
        Ok(Self {
            database,
            snapshots,
            writes: Mutex::new(()),
        })
    }

    /// The most recently published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Re-read the whole table and publish it
    pub async fn refresh(&self) -> StoreResult<()> {
        let _guard = self.writes.lock().await;
        self.publish().await
    }

    async fn publish(&self) -> StoreResult<()> {
        let records = run_blocking(&self.database, Feeding::list).await?;
        tracing::debug!(rows = records.len(), "publishing feeding snapshot");
        self.snapshots.send_replace(Arc::new(records));
        Ok(())
    }
}

#[async_trait]
impl FeedingRepository for SqliteFeedingRepository {
    async fn get_feeding(&self, id: i64) -> StoreResult<Option<Feeding>> {
        run_blocking(&self.database, move |conn| Feeding::get_by_id(conn, id)).await
    }

    async fn save_feeding(&self, data: FeedingCreate) -> StoreResult<Feeding> {
        data.validate()?;
        let _guard = self.writes.lock().await;
        let feeding = run_blocking(&self.database, move |conn| Feeding::create(conn, &data)).await?;
        tracing::info!(id = feeding.id, quantity = feeding.quantity, unit = %feeding.unit, "saved feeding");
        self.publish().await?;
        Ok(feeding)
    }

    async fn update_feeding(&self, id: i64, data: FeedingCreate) -> StoreResult<Option<Feeding>> {
        data.validate()?;
        let _guard = self.writes.lock().await;
        let updated = run_blocking(&self.database, move |conn| Feeding::update(conn, id, &data)).await?;
        if updated.is_some() {
            tracing::info!(id, "updated feeding");
            self.publish().await?;
        }
        Ok(updated)
    }

    async fn delete_feeding(&self, id: i64) -> StoreResult<bool> {
        let _guard = self.writes.lock().await;
        let deleted = run_blocking(&self.database, move |conn| Feeding::delete(conn, id)).await?;
        if deleted {
            tracing::info!(id, "deleted feeding");
            self.publish().await?;
        }
        Ok(deleted)
    }

    fn feedings(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::test_support::temp_database;
    use crate::models::parse_timestamp;
    use crate::units::UnitOfMeasurement;

    fn create(ts: &str, quantity: f64, unit: UnitOfMeasurement) -> FeedingCreate {
        FeedingCreate {
            timestamp: parse_timestamp(ts).unwrap(),
            quantity,
            unit,
        }
    }

    #[tokio::test]
    async fn test_save_publishes_full_snapshot() {
        let (_dir, db) = temp_database();
        let repo = SqliteFeedingRepository::new(db).unwrap();
        let mut rx = repo.feedings();
        assert!(rx.borrow_and_update().is_empty());

        let first = repo
            .save_feeding(create("2026-10-14T08:00", 4.0, UnitOfMeasurement::Ounce))
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        repo.save_feeding(create("2026-10-14T12:00", 120.0, UnitOfMeasurement::Milliliter))
            .await
            .unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.len(), 2);
        // most recent first
        assert_eq!(snapshot[1].as_ref().unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_dir, db) = temp_database();
        let repo = SqliteFeedingRepository::new(db).unwrap();

        let saved = repo
            .save_feeding(create("2026-10-14T08:00", 4.0, UnitOfMeasurement::Ounce))
            .await
            .unwrap();

        let updated = repo
            .update_feeding(saved.id, create("2026-10-14T08:30", 5.0, UnitOfMeasurement::Ounce))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 5.0);
        assert_eq!(repo.get_feeding(saved.id).await.unwrap(), Some(updated));

        assert!(repo.delete_feeding(saved.id).await.unwrap());
        assert!(!repo.delete_feeding(saved.id).await.unwrap());
        assert!(repo.snapshot().is_empty());
        assert_eq!(repo.get_feeding(saved.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_storage() {
        let (_dir, db) = temp_database();
        let repo = SqliteFeedingRepository::new(db).unwrap();
        let rx = repo.feedings();

        let err = repo
            .save_feeding(create("2026-10-14T08:00", -1.0, UnitOfMeasurement::Ounce))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(FeedingError::NegativeQuantity(_))));
        assert!(!rx.has_changed().unwrap());
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_publish() {
        let (_dir, db) = temp_database();
        let repo = SqliteFeedingRepository::new(db).unwrap();
        let rx = repo.feedings();
        assert!(!repo.delete_feeding(99).await.unwrap());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_initial_snapshot_includes_existing_rows() {
        let (_dir, db) = temp_database();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO feedings (timestamp, quantity, unit) VALUES ('bad', 1, 'ounce')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let repo = SqliteFeedingRepository::new(db).unwrap();
        let snapshot = repo.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_leave_latest_snapshot_published() {
        for _ in 0..10 {
            let (_dir, db) = temp_database();
            let repo = Arc::new(SqliteFeedingRepository::new(db.clone()).unwrap());

            let saves: Vec<_> = (0..16)
                .map(|i| {
                    let repo = Arc::clone(&repo);
                    tokio::spawn(async move {
                        let ts = format!("2026-10-14T08:{:02}", i);
                        repo.save_feeding(create(&ts, 1.0, UnitOfMeasurement::Ounce)).await
                    })
                })
                .collect();
            for save in saves {
                save.await.unwrap().unwrap();
            }

            let published: Vec<i64> = repo.snapshot().iter().map(|r| r.as_ref().unwrap().id).collect();
            let stored: Vec<i64> = db
                .with_conn(Feeding::list)
                .unwrap()
                .iter()
                .map(|r| r.as_ref().unwrap().id)
                .collect();
            assert_eq!(published.len(), 16);
            assert_eq!(published, stored);
        }
    }
}
