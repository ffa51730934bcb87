//! Result and error shapes returned by jiralink-mcp tools.
//!
//! Successful Jira lookups are returned as structured content holding the
//! decoded Jira JSON unchanged. Failures become an `is_error` tool result whose
//! text is a JSON-serialized [`ToolError`].

use jiralink_jira::JiraError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::debug;

/// Consistent error shape returned by all tools.
#[derive(Debug, Serialize)]
pub struct ToolError {
  pub code: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hint: Option<String>,
}

impl ToolError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, hint: Option<&str>) -> Self {
    Self {
      code: code.into(),
      message: message.into(),
      hint: hint.map(str::to_string),
    }
  }

  /// Serialize to a failed `CallToolResult`.
  pub fn to_call_tool_result(&self) -> CallToolResult {
    let json = serde_json::to_string(self).unwrap_or_else(|e| {
      format!(r#"{{"code":"internal","message":"Serialization failed: {e}"}}"#)
    });
    CallToolResult::error(vec![Content::text(json)])
  }
}

impl From<&JiraError> for ToolError {
  fn from(err: &JiraError) -> Self {
    let (code, hint) = match err {
      JiraError::Remote { .. } => match err.status().map(|s| s.as_u16()) {
        Some(401 | 403) => (
          "unauthorized",
          Some("Check JIRA_USER_EMAIL and JIRA_API_TOKEN, and that the account can access this resource."),
        ),
        Some(404) => ("not_found", Some("Check the issue key and that the account can see the issue.")),
        _ => ("remote_error", None),
      },
      JiraError::Transport(_) if err.is_timeout() => ("timeout", Some("Jira did not answer within 30 seconds.")),
      JiraError::Transport(_) => ("network_error", Some("Check JIRA_INSTANCE_URL and network connectivity.")),
      JiraError::InvalidIssueKey(_) => ("invalid_params", Some("Pass an issue key such as PROJ-123.")),
      JiraError::Decode { .. } => ("decode_error", None),
      JiraError::Cancelled { .. } => ("cancelled", None),
      JiraError::Config(_) | JiraError::InvalidBaseUrl { .. } | JiraError::Serialize(_) => ("internal", None),
    };
    Self::new(code, err.to_string(), hint)
  }
}

/// Wrap a Jira result as structured content, or as a failed tool result.
pub fn structured_result<T: Serialize>(tool: &str, outcome: Result<T, JiraError>) -> CallToolResult {
  let value = outcome
    .map_err(|e| ToolError::from(&e))
    .and_then(|data| {
      serde_json::to_value(data).map_err(|e| ToolError::new("internal", format!("Serialization failed: {e}"), None))
    });

  match value {
    Ok(value) => CallToolResult::structured(value),
    Err(error) => {
      debug!("tool={tool} error={}", error.message);
      error.to_call_tool_result()
    }
  }
}

/// Acknowledge a Jira call that returns nothing worth showing.
pub fn ack_result(tool: &str, outcome: Result<(), JiraError>) -> CallToolResult {
  match outcome {
    Ok(()) => CallToolResult::success(vec![Content::text("ok")]),
    Err(e) => {
      debug!("tool={tool} error={e}");
      ToolError::from(&e).to_call_tool_result()
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::*;

  fn cancelled() -> JiraError {
    JiraError::Cancelled {
      method: jiralink_jira::Method::GET,
      path: "/rest/api/3/issue/PROJ-1".to_string(),
    }
  }

  #[test]
  fn test_error_result_is_flagged_and_serialized() {
    let result = ToolError::from(&cancelled()).to_call_tool_result();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["isError"], json!(true));
    let text = value["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(
      envelope,
      json!({
          "code": "cancelled",
          "message": "jira GET /rest/api/3/issue/PROJ-1 cancelled"
      })
    );
  }

  #[test]
  fn test_ack_result_is_plain_ok() {
    let value = serde_json::to_value(ack_result("add_comment", Ok(()))).unwrap();

    assert_eq!(value["content"], json!([{ "type": "text", "text": "ok" }]));
    assert_ne!(value["isError"], json!(true));
  }

  #[test]
  fn test_structured_result_passes_value_through() {
    let data = json!({ "id": "1", "key": "PROJ-1", "fields": { "summary": "Hello" } });
    let value = serde_json::to_value(structured_result("get_issue", Ok(data.clone()))).unwrap();

    assert_eq!(value["structuredContent"], data);
    assert_ne!(value["isError"], json!(true));
  }

  #[test]
  fn test_structured_result_maps_errors() {
    let value = serde_json::to_value(structured_result::<Value>("get_issue", Err(cancelled()))).unwrap();

    assert_eq!(value["isError"], json!(true));
    assert!(value.get("structuredContent").is_none_or(Value::is_null));
  }
}
