//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations,
//! including fetching, creating, and commenting on Jira issues.

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::client::{JiraClient, NO_BODY};
use crate::consts::ISSUE_SEGMENTS;
use crate::error::JiraError;
use crate::models::{AddCommentRequest, CreateIssueRequest, Issue};

impl JiraClient {
  /// Get a Jira issue by key
  #[instrument(skip(self, cancel), level = "debug")]
  pub async fn get_issue(&self, issue_key: &str, cancel: &CancellationToken) -> Result<Issue, JiraError> {
    let url = self.endpoint(&issue_path(issue_key, None)?)?;
    self.send_json(Method::GET, url, NO_BODY, cancel).await
  }

  /// Add a plain-text comment to an issue
  ///
  /// Jira's response body is ignored; only the status decides success.
  #[instrument(skip(self, body, cancel), level = "debug")]
  pub async fn add_comment(&self, issue_key: &str, body: &str, cancel: &CancellationToken) -> Result<(), JiraError> {
    debug!("Adding comment of {} bytes", body.len());
    let url = self.endpoint(&issue_path(issue_key, Some("comment"))?)?;
    let payload = AddCommentRequest { body };
    self.send(Method::POST, url, Some(&payload), cancel).await?;
    Ok(())
  }

  /// Create a new issue and return what Jira reports back (id, key, self)
  #[instrument(skip(self, description, cancel), level = "debug")]
  pub async fn create_issue(
    &self,
    project_key: &str,
    issue_type: &str,
    summary: &str,
    description: &str,
    cancel: &CancellationToken,
  ) -> Result<Issue, JiraError> {
    let url = self.endpoint(&ISSUE_SEGMENTS)?;
    let payload = CreateIssueRequest::new(project_key, issue_type, summary, description);
    self.send_json(Method::POST, url, Some(&payload), cancel).await
  }
}

/// Path segments of an issue resource.
///
/// URL parsing resolves `.` and `..` segments even when percent-encoded, which
/// would silently retarget the request, so such keys are rejected up front.
fn issue_path<'a>(issue_key: &'a str, sub_resource: Option<&'a str>) -> Result<Vec<&'a str>, JiraError> {
  if matches!(issue_key, "" | "." | "..") {
    return Err(JiraError::InvalidIssueKey(issue_key.to_string()));
  }

  let mut segments: Vec<&'a str> = ISSUE_SEGMENTS.to_vec();
  segments.push(issue_key);
  segments.extend(sub_resource);
  Ok(segments)
}
