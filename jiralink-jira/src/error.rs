//! Error type surfaced by every Jira client operation.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Failures produced while configuring the client or talking to Jira.
///
/// None of the variants carry the authorization header or the API token, so
/// the display text is safe to hand back to a tool caller.
#[derive(Debug, Error)]
pub enum JiraError {
  /// Required configuration is missing or empty.
  #[error("{0}")]
  Config(String),

  /// The configured base URL is not an absolute http(s) URL.
  #[error("invalid JIRA_INSTANCE_URL '{url}': {reason}")]
  InvalidBaseUrl { url: String, reason: String },

  /// The issue key cannot be addressed as a single URL path segment.
  #[error("invalid issue key {0:?}: must be non-empty and not '.' or '..'")]
  InvalidIssueKey(String),

  /// A request payload could not be encoded.
  #[error("failed to encode Jira request body: {0}")]
  Serialize(#[source] serde_json::Error),

  /// DNS, connection, TLS, or timeout failure from the HTTP layer.
  #[error("Jira request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// Jira answered with a status of 300 or above.
  #[error("jira {method} {path} failed: {status} - {body}")]
  Remote {
    method: Method,
    path: String,
    status: StatusCode,
    body: String,
  },

  /// The response body did not match the expected JSON shape.
  #[error("failed to decode response of jira {method} {path}: {source}")]
  Decode {
    method: Method,
    path: String,
    #[source]
    source: serde_json::Error,
  },

  /// The caller gave up on the request before it completed.
  #[error("jira {method} {path} cancelled")]
  Cancelled { method: Method, path: String },
}

impl JiraError {
  /// HTTP status of a remote failure, if this is one.
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Remote { status, .. } => Some(*status),
      Self::Transport(err) => err.status(),
      _ => None,
    }
  }

  /// Whether the failure came from the network layer timing out.
  pub fn is_timeout(&self) -> bool {
    matches!(self, Self::Transport(err) if err.is_timeout())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_remote_error_display_mentions_method_path_and_status() {
    let error = JiraError::Remote {
      method: Method::GET,
      path: "/rest/api/3/issue/NOPE-1".to_string(),
      status: StatusCode::NOT_FOUND,
      body: r#"{"errorMessages":["Issue does not exist"]}"#.to_string(),
    };

    let message = error.to_string();
    assert_eq!(
      message,
      r#"jira GET /rest/api/3/issue/NOPE-1 failed: 404 Not Found - {"errorMessages":["Issue does not exist"]}"#
    );
    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
  }

  #[test]
  fn test_cancelled_error_has_no_status() {
    let error = JiraError::Cancelled {
      method: Method::POST,
      path: "/rest/api/3/issue".to_string(),
    };

    assert_eq!(error.to_string(), "jira POST /rest/api/3/issue cancelled");
    assert_eq!(error.status(), None);
    assert!(!error.is_timeout());
  }
}
