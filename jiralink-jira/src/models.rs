use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat an explicit JSON `null` the same as a missing member.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Represents a Jira issue
///
/// `fields` is kept as raw JSON because the available fields depend on how the
/// Jira instance is configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
  pub id: String,
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
  pub key: String,
  #[serde(rename = "self", default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
  pub self_link: String,
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Map::is_empty")]
  pub fields: Map<String, Value>,
}

/// Represents one page of JQL search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
  #[serde(default, deserialize_with = "null_as_default")]
  pub start_at: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub max_results: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub total: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub issues: Vec<Issue>,
}

/// Represents a comment request payload
#[derive(Debug, Serialize)]
pub(crate) struct AddCommentRequest<'a> {
  pub body: &'a str,
}

/// Represents an issue creation payload
#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest {
  pub fields: CreateIssueFields,
}

/// Fields sent when creating an issue
#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueFields {
  pub project: ProjectRef,
  pub summary: String,
  pub description: String,
  pub issuetype: IssueTypeRef,
}

/// Reference to a project by key
#[derive(Debug, Serialize)]
pub(crate) struct ProjectRef {
  pub key: String,
}

/// Reference to an issue type by name
#[derive(Debug, Serialize)]
pub(crate) struct IssueTypeRef {
  pub name: String,
}

impl CreateIssueRequest {
  pub(crate) fn new(project_key: &str, issue_type: &str, summary: &str, description: &str) -> Self {
    Self {
      fields: CreateIssueFields {
        project: ProjectRef {
          key: project_key.to_string(),
        },
        summary: summary.to_string(),
        description: description.to_string(),
        issuetype: IssueTypeRef {
          name: issue_type.to_string(),
        },
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_issue_deserialization_keeps_arbitrary_fields() {
    let json = json!({
        "id": "10000",
        "key": "PROJ-123",
        "self": "https://example.atlassian.net/rest/api/3/issue/10000",
        "fields": {
            "summary": "Test issue",
            "status": {
                "name": "In Progress"
            },
            "customfield_10010": [1, 2, 3],
            "assignee": null
        }
    });

    let issue: Issue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.id, "10000");
    assert_eq!(issue.key, "PROJ-123");
    assert_eq!(issue.self_link, "https://example.atlassian.net/rest/api/3/issue/10000");
    assert_eq!(issue.fields["summary"], json!("Test issue"));
    assert_eq!(issue.fields["status"]["name"], json!("In Progress"));
    assert_eq!(issue.fields["customfield_10010"], json!([1, 2, 3]));
    assert_eq!(issue.fields["assignee"], Value::Null);
  }

  #[test]
  fn test_issue_fields_preserve_order() {
    let issue: Issue = serde_json::from_str(r#"{"key":"A-1","fields":{"zeta":1,"alpha":2,"mid":3}}"#).unwrap();

    let names: Vec<&str> = issue.fields.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
  }

  #[test]
  fn test_created_issue_serialization_omits_empty_members() {
    let issue: Issue = serde_json::from_value(json!({
        "id": "10001",
        "key": "PROJ-124",
        "self": "https://example.atlassian.net/rest/api/3/issue/10001"
    }))
    .unwrap();

    assert_eq!(
      serde_json::to_value(&issue).unwrap(),
      json!({
          "id": "10001",
          "key": "PROJ-124",
          "self": "https://example.atlassian.net/rest/api/3/issue/10001"
      })
    );
  }

  #[test]
  fn test_explicit_null_members_decode_as_empty() {
    let issue: Issue = serde_json::from_str(r#"{"id":"1","key":"A-1","self":null,"fields":null}"#).unwrap();
    assert_eq!(issue.key, "A-1");
    assert!(issue.self_link.is_empty());
    assert!(issue.fields.is_empty());

    let result: SearchResult =
      serde_json::from_str(r#"{"startAt":null,"maxResults":50,"total":null,"issues":null}"#).unwrap();
    assert_eq!(result.start_at, 0);
    assert_eq!(result.max_results, 50);
    assert_eq!(result.total, 0);
    assert!(result.issues.is_empty());
  }

  #[test]
  fn test_search_result_deserialization() {
    let json = json!({
        "expand": "schema,names",
        "startAt": 0,
        "maxResults": 2,
        "total": 7,
        "issues": [
            { "id": "1", "key": "PROJ-1", "fields": { "summary": "One" } },
            { "id": "2", "key": "PROJ-2", "fields": { "summary": "Two" } }
        ]
    });

    let result: SearchResult = serde_json::from_value(json).unwrap();

    assert_eq!(result.start_at, 0);
    assert_eq!(result.max_results, 2);
    assert_eq!(result.total, 7);
    assert_eq!(result.issues.len(), 2);
    assert_eq!(result.issues[1].key, "PROJ-2");
  }

  #[test]
  fn test_create_issue_request_serialization() {
    let request = CreateIssueRequest::new("PROJ", "Bug", "Broken build", "CI fails on main");

    assert_eq!(
      serde_json::to_value(&request).unwrap(),
      json!({
          "fields": {
              "project": { "key": "PROJ" },
              "summary": "Broken build",
              "description": "CI fails on main",
              "issuetype": { "name": "Bug" }
          }
      })
    );
  }

  #[test]
  fn test_add_comment_request_serialization() {
    let request = AddCommentRequest { body: "Looks good" };

    assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"body":"Looks good"}"#);
  }
}
