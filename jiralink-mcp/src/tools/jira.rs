//! Parameter structs for Jira tools.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetIssueParams {
  /// Jira issue key, e.g. PROJ-123
  pub key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchIssuesParams {
  /// JQL query, e.g. `project = PROJ AND status = "In Progress"`
  pub jql: String,
  /// Maximum number of issues to return (1-1000). Anything else means 50.
  #[serde(default)]
  pub max_results: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddCommentParams {
  /// Jira issue key, e.g. PROJ-123
  pub key: String,
  /// Comment text
  pub body: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
  /// Key of the project the issue belongs to, e.g. PROJ
  pub project_key: String,
  /// Issue type name, e.g. Bug, Task, Story
  pub issue_type: String,
  /// One-line summary
  pub summary: String,
  /// Longer description
  #[serde(default)]
  pub description: Option<String>,
}
