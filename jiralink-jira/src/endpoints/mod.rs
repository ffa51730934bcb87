//! # Jira API Endpoints
//!
//! Endpoint implementations for the Jira REST v3 resources the MCP server
//! exposes: issues, comments, and JQL search.

pub mod issues;
pub mod search;
