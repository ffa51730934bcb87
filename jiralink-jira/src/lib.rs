//! # Jira API Client
//!
//! Minimal Jira Cloud REST (v3) client used by the jiralink MCP server:
//! fetch an issue, search with JQL, add a comment, and create an issue. Every
//! operation is a single authenticated HTTP round trip that can be cancelled
//! by the caller.

mod client;
pub mod config;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;

// Re-export the client
pub use client::JiraClient;
pub use config::JiraConfig;
pub use error::JiraError;
// Re-export models
pub use models::{Issue, SearchResult};
pub use reqwest::Method;
