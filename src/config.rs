//! Runtime configuration
//!
//! Read from environment variables at startup.

use std::path::PathBuf;

/// Tracing directive used when `FEEDME_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "feedme=info";

/// Service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file (`FEEDME_DATABASE_PATH`)
    pub database_path: PathBuf,
    /// Extra tracing directive (`FEEDME_LOG`), layered over `RUST_LOG`
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("FEEDME_DATABASE_PATH").ok(),
            std::env::var("FEEDME_LOG").ok(),
        )
    }

    fn from_vars(database_path: Option<String>, log_filter: Option<String>) -> Self {
        Self {
            database_path: database_path
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            log_filter: log_filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

/// `<project root>/data/feedme.db`, where the project root is found from the executable
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("feedme.db");
    path
}
