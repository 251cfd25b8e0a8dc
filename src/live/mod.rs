//! Live feeding state
//!
//! Async persistence on top of the blocking SQLite layer. Every write
//! publishes a full re-read of the feedings table on a watch channel, and
//! consumers rebuild their derived state from that snapshot.

pub mod preferences;
pub mod projection;
pub mod repository;

pub use preferences::PreferenceStore;
pub use projection::{spawn_projection, DaySection, HistoryView};
pub use repository::{FeedingRepository, Snapshot, SqliteFeedingRepository, StoreError, StoreResult};
