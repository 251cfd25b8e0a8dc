//! FeedMe
//!
//! An MCP server for infant feeding tracking.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use feedme::build_info::{self, BuildInfo};
use feedme::config::Config;
use feedme::db::Database;
use feedme::live::{spawn_projection, FeedingRepository, PreferenceStore, SqliteFeedingRepository};
use feedme::mcp::FeedMeService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    // Output to stderr to not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_filter.parse()?))
        .with_writer(std::io::stderr)
        .init();

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::open_migrated(&config.database_path)?;
    let feedings = Arc::new(SqliteFeedingRepository::new(database.clone())?);
    let preferences = PreferenceStore::new(database.clone())?;

    eprintln!(
        "{}",
        build_info::startup_banner(&BuildInfo::current(), &database, preferences.get().display_unit)
    );

    let (mut history, _projection) = spawn_projection(feedings.feedings(), preferences.subscribe());
    tokio::spawn(async move {
        while history.changed().await.is_ok() {
            let view = history.borrow_and_update().clone();
            if view.skipped_records > 0 {
                tracing::warn!(skipped = view.skipped_records, "feedings with unreadable rows");
            }
        }
    });

    let service = FeedMeService::new(database, feedings, preferences);

    eprintln!("Starting MCP server on stdio...");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
