//! FeedMe Tools module
//!
//! MCP tool implementations for the feeding tracker.

pub mod days;
pub mod feedings;
pub mod preferences;
pub mod status;
