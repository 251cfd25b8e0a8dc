//! FeedMe MCP Server Implementation
//!
//! Implements the MCP server with all FeedMe tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::live::{PreferenceStore, SqliteFeedingRepository};
use crate::tools::days::{self, resolve_unit};
use crate::tools::feedings;
use crate::tools::preferences;
use crate::tools::status::StatusTracker;

/// FeedMe MCP Service
#[derive(Clone)]
pub struct FeedMeService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    feedings: Arc<SqliteFeedingRepository>,
    preferences: PreferenceStore,
    tool_router: ToolRouter<FeedMeService>,
}

impl FeedMeService {
    pub fn new(
        database: Database,
        feedings: Arc<SqliteFeedingRepository>,
        preferences: PreferenceStore,
    ) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database))),
            feedings,
            preferences,
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Feeding Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFeedingParams {
    /// Local time of the feeding: YYYY-MM-DDTHH:MM (seconds optional)
    pub timestamp: String,
    /// Amount fed (zero or greater)
    pub quantity: f64,
    /// Unit the amount was measured in: oz or ml
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFeedingParams {
    /// Feeding ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFeedingParams {
    /// Feeding ID to update
    pub id: i64,
    /// New local time: YYYY-MM-DDTHH:MM (seconds optional)
    pub timestamp: String,
    /// New amount (zero or greater)
    pub quantity: f64,
    /// New unit: oz or ml
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteFeedingParams {
    /// Feeding ID to delete
    pub id: i64,
}

// ============================================================================
// Day Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDaysParams {
    /// Display unit override (oz or ml); defaults to the stored preference
    pub unit: Option<String>,
    /// Show times on a 24-hour clock (default false)
    #[serde(default)]
    pub use_24_hour_clock: bool,
    /// Maximum days returned, most recent first (default 30, max 365)
    #[serde(default = "default_day_limit")]
    pub limit: usize,
}

fn default_day_limit() -> usize { 30 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDaySummaryParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Show times on a 24-hour clock (default false)
    #[serde(default)]
    pub use_24_hour_clock: bool,
    /// Display unit override (oz or ml)
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProgressPointsParams {
    /// Restrict to one date (YYYY-MM-DD); all feedings when omitted
    pub date: Option<String>,
    /// Display unit override (oz or ml)
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetDisplayUnitParams {
    /// oz or ml
    pub unit: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FeedMeService {
    // --- Status ---

    #[tool(description = "Get the current status of the FeedMe service including build info, database status, and process information")]
    async fn feedme_status(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self.feedings.snapshot();
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(&snapshot, &self.preferences.get()))
    }

    #[tool(description = "Get instructions for logging and reviewing feedings. Call this when starting a new logging session.")]
    fn feeding_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::FEEDING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(FEEDING_INSTRUCTIONS)]))
    }

    // --- Feedings ---

    #[tool(description = "Log a feeding with its local time, quantity, and unit (oz or ml)")]
    async fn log_feeding(&self, Parameters(p): Parameters<LogFeedingParams>) -> Result<CallToolResult, McpError> {
        let result = feedings::log_feeding(self.feedings.as_ref(), &p.timestamp, p.quantity, &p.unit)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a feeding by ID")]
    async fn get_feeding(&self, Parameters(p): Parameters<GetFeedingParams>) -> Result<CallToolResult, McpError> {
        let result = feedings::get_feeding(self.feedings.as_ref(), p.id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(feeding) => json_result(&feeding),
            None => json_result(&serde_json::json!({"error": "Feeding not found", "id": p.id})),
        }
    }

    #[tool(description = "Replace a feeding's time, quantity, and unit, keeping its ID")]
    async fn update_feeding(&self, Parameters(p): Parameters<UpdateFeedingParams>) -> Result<CallToolResult, McpError> {
        let result = feedings::update_feeding(self.feedings.as_ref(), p.id, &p.timestamp, p.quantity, &p.unit)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(feeding) => json_result(&feeding),
            None => json_result(&serde_json::json!({"error": "Feeding not found", "id": p.id})),
        }
    }

    #[tool(description = "Delete a feeding")]
    async fn delete_feeding(&self, Parameters(p): Parameters<DeleteFeedingParams>) -> Result<CallToolResult, McpError> {
        let deleted = feedings::delete_feeding(self.feedings.as_ref(), p.id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&serde_json::json!({"success": deleted, "id": p.id}))
    }

    // --- Days ---

    #[tool(description = "List days most recent first, each with its feedings in time order and the day's total in the display unit")]
    fn list_days(&self, Parameters(p): Parameters<ListDaysParams>) -> Result<CallToolResult, McpError> {
        let unit = resolve_unit(p.unit.as_deref(), &self.preferences.get())
            .map_err(|e| McpError::internal_error(e, None))?;
        let snapshot = self.feedings.snapshot();
        json_result(&days::list_days(&snapshot, unit, p.use_24_hour_clock, p.limit))
    }

    #[tool(description = "Get a shareable plain-text summary of one day's feedings with a total line")]
    fn get_day_summary(&self, Parameters(p): Parameters<GetDaySummaryParams>) -> Result<CallToolResult, McpError> {
        let unit = resolve_unit(p.unit.as_deref(), &self.preferences.get())
            .map_err(|e| McpError::internal_error(e, None))?;
        let snapshot = self.feedings.snapshot();
        let result = days::day_summary(&snapshot, &p.date, p.use_24_hour_clock, unit)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get cumulative running-total points for the progress graph, optionally for one date")]
    fn get_progress_points(&self, Parameters(p): Parameters<GetProgressPointsParams>) -> Result<CallToolResult, McpError> {
        let unit = resolve_unit(p.unit.as_deref(), &self.preferences.get())
            .map_err(|e| McpError::internal_error(e, None))?;
        let snapshot = self.feedings.snapshot();
        let result = days::progress_points(&snapshot, p.date.as_deref(), unit)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Preferences ---

    #[tool(description = "Get the display unit used for totals and summaries")]
    fn get_preferences(&self) -> Result<CallToolResult, McpError> {
        json_result(&preferences::get_preferences(&self.preferences))
    }

    #[tool(description = "Set the display unit used for totals and summaries (oz or ml)")]
    async fn set_display_unit(&self, Parameters(p): Parameters<SetDisplayUnitParams>) -> Result<CallToolResult, McpError> {
        let result = preferences::set_display_unit(&self.preferences, &p.unit)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FeedMeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "feedme".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FeedMe".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FeedMe - infant feeding tracker. \
                 Call feeding_instructions when starting a session. \
                 Feedings: log_feeding/get_feeding/update_feeding/delete_feeding. \
                 Days: list_days, get_day_summary (shareable text), get_progress_points. \
                 Preferences: get_preferences/set_display_unit. \
                 Status: feedme_status."
                    .into(),
            ),
        }
    }
}
