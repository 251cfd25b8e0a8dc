//! Build metadata
//!
//! The version and build stamp embedded by `build.rs`, together with the
//! storage format this binary reads and writes.

use serde::Serialize;

use crate::db::migrations::SCHEMA_VERSION;
use crate::db::Database;
use crate::units::UnitOfMeasurement;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Recompilation counter from `build.rs`
pub const BUILD_NUMBER: &str = match option_env!("FEEDME_BUILD_NUMBER") {
    Some(s) => s,
    None => "0",
};

/// UTC compile time from `build.rs`
pub const BUILD_TIMESTAMP: &str = match option_env!("FEEDME_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// What this binary is and which data it understands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    /// Schema version databases are migrated to on open
    pub schema_version: i32,
    /// Unit abbreviations accepted for feeding quantities
    pub units: Vec<&'static str>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER.parse().unwrap_or(0),
            build_timestamp: BUILD_TIMESTAMP,
            schema_version: SCHEMA_VERSION,
            units: UnitOfMeasurement::ALL.iter().map(|u| u.abbreviation()).collect(),
        }
    }

    /// Version with build number, e.g. "1.0.0+42"
    pub fn label(&self) -> String {
        format!("{}+{}", self.version, self.build_number)
    }
}

/// Startup banner for stderr, describing the opened database
pub fn startup_banner(info: &BuildInfo, database: &Database, display_unit: UnitOfMeasurement) -> String {
    let schema = database
        .schema_version()
        .map(|v| format!("v{}", v))
        .unwrap_or_else(|e| format!("unreadable ({})", e));

    [
        "===============================================".to_string(),
        format!("  FeedMe {} (compiled {})", info.label(), info.build_timestamp),
        format!("  Database: {}", database.path().display()),
        format!("  Schema: {} | Units: {}", schema, info.units.join(", ")),
        format!("  Totals shown in: {}", display_unit.abbreviation()),
        "===============================================".to_string(),
    ]
    .join("\n")
}
