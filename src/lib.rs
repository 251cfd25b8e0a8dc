//! FeedMe Library
//!
//! Infant feeding tracking: unit conversion, day grouping and totals, share
//! summaries, progress points, and the swipe-to-delete row gesture.

pub mod aggregation;
pub mod build_info;
pub mod config;
pub mod db;
pub mod gesture;
pub mod live;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod units;
