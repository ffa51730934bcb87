//! Shared server context available to all tool handlers.

use jiralink_jira::JiraClient;

/// Shared context available to all tool handlers.
///
/// Built once at startup and never mutated afterwards, so handlers running
/// concurrently only ever read from it.
pub struct ServerContext {
  jira: JiraClient,
}

impl ServerContext {
  pub const fn new(jira: JiraClient) -> Self {
    Self { jira }
  }

  /// The Jira client every tool talks through.
  pub const fn jira(&self) -> &JiraClient {
    &self.jira
  }
}
