//! Data models
//!
//! Rust structs representing database entities.

mod feeding;
mod preferences;

pub use feeding::{
    parse_timestamp, Feeding, FeedingCreate, FeedingError, FeedingRecord, InvalidFeeding,
    TIMESTAMP_FORMAT,
};
pub use preferences::Preferences;
