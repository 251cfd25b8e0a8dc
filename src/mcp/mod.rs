//! MCP server
//!
//! Exposes the feeding tracker as Model Context Protocol tools over stdio.

mod server;

pub use server::FeedMeService;
