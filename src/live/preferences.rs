//! Preference store
//!
//! Persists the display unit and broadcasts every change.

use std::sync::Arc;

use tokio::sync::watch;

use super::repository::{run_blocking, StoreResult};
use crate::db::Database;
use crate::models::Preferences;
use crate::units::UnitOfMeasurement;

#[derive(Clone)]
pub struct PreferenceStore {
    database: Database,
    sender: Arc<watch::Sender<Preferences>>,
}

impl PreferenceStore {
    pub fn new(database: Database) -> StoreResult<Self> {
        let current = database.with_conn(Preferences::get)?;
        let (sender, _) = watch::channel(current);
        Ok(Self {
            database,
            sender: Arc::new(sender),
        })
    }

    pub fn get(&self) -> Preferences {
        *self.sender.borrow()
    }

    pub async fn set_display_unit(&self, unit: UnitOfMeasurement) -> StoreResult<Preferences> {
        let prefs = run_blocking(&self.database, move |conn| Preferences::set_display_unit(conn, unit)).await?;
        tracing::info!(display_unit = %prefs.display_unit, "display unit changed");
        self.sender.send_replace(prefs);
        Ok(prefs)
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.sender.subscribe()
    }
}
