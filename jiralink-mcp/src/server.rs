//! MCP server implementation with all tool handlers.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, tool, tool_handler, tool_router};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::context::ServerContext;
use crate::tools::jira::{AddCommentParams, CreateIssueParams, GetIssueParams, SearchIssuesParams};
use crate::types::{ack_result, structured_result};

/// Name the server reports to MCP hosts.
pub const SERVER_NAME: &str = "jiralink-mcp";

/// Longest slice of a comment body written to the debug log.
const PREVIEW_CHARS: usize = 80;

#[derive(Clone)]
pub struct JiraMcpServer {
  context: Arc<ServerContext>,
  tool_router: ToolRouter<Self>,
}

#[tool_router]
impl JiraMcpServer {
  pub fn new(context: ServerContext) -> Self {
    let context = Arc::new(context);
    Self {
      context,
      tool_router: Self::tool_router(),
    }
  }

  #[tool(
    title = "Get Issue",
    description = "Get a Jira issue by key",
    annotations(read_only_hint = true, idempotent_hint = true)
  )]
  async fn get_issue(
    &self,
    Parameters(params): Parameters<GetIssueParams>,
    ctx: RequestContext<RoleServer>,
  ) -> Result<CallToolResult, McpError> {
    Ok(self.run_get_issue(params, &ctx.ct).await)
  }

  #[tool(
    title = "Search Issues",
    description = "Search Jira with JQL",
    annotations(read_only_hint = true, idempotent_hint = true)
  )]
  async fn search_issues(
    &self,
    Parameters(params): Parameters<SearchIssuesParams>,
    ctx: RequestContext<RoleServer>,
  ) -> Result<CallToolResult, McpError> {
    Ok(self.run_search_issues(params, &ctx.ct).await)
  }

  #[tool(
    title = "Add Comment",
    description = "Add a comment to a Jira issue",
    annotations(read_only_hint = false, destructive_hint = false, idempotent_hint = false)
  )]
  async fn add_comment(
    &self,
    Parameters(params): Parameters<AddCommentParams>,
    ctx: RequestContext<RoleServer>,
  ) -> Result<CallToolResult, McpError> {
    Ok(self.run_add_comment(params, &ctx.ct).await)
  }

  #[tool(
    title = "Create Issue",
    description = "Create a Jira issue",
    annotations(read_only_hint = false, destructive_hint = false, idempotent_hint = false)
  )]
  async fn create_issue(
    &self,
    Parameters(params): Parameters<CreateIssueParams>,
    ctx: RequestContext<RoleServer>,
  ) -> Result<CallToolResult, McpError> {
    Ok(self.run_create_issue(params, &ctx.ct).await)
  }
}

// Handler bodies take the cancellation token directly so they can be driven
// without a live MCP peer.
impl JiraMcpServer {
  async fn run_get_issue(&self, params: GetIssueParams, cancel: &CancellationToken) -> CallToolResult {
    debug!("tool=get_issue args={{key:{:?}}}", params.key);
    let outcome = self.context.jira().get_issue(&params.key, cancel).await;
    structured_result("get_issue", outcome)
  }

  async fn run_search_issues(&self, params: SearchIssuesParams, cancel: &CancellationToken) -> CallToolResult {
    debug!(
      "tool=search_issues args={{jql:{:?},max:{:?}}}",
      params.jql, params.max_results
    );
    let outcome = self
      .context
      .jira()
      .search(&params.jql, params.max_results, cancel)
      .await;
    structured_result("search_issues", outcome)
  }

  async fn run_add_comment(&self, params: AddCommentParams, cancel: &CancellationToken) -> CallToolResult {
    debug!(
      "tool=add_comment args={{key:{:?}, body-preview:{:?}}}",
      params.key,
      preview(&params.body, PREVIEW_CHARS)
    );
    let outcome = self
      .context
      .jira()
      .add_comment(&params.key, &params.body, cancel)
      .await;
    ack_result("add_comment", outcome)
  }

  async fn run_create_issue(&self, params: CreateIssueParams, cancel: &CancellationToken) -> CallToolResult {
    let description = params.description.unwrap_or_default();
    debug!(
      "tool=create_issue args={{project:{:?},type:{:?},summary:{:?},desc-len:{}}}",
      params.project_key,
      params.issue_type,
      params.summary,
      description.len()
    );
    let outcome = self
      .context
      .jira()
      .create_issue(
        &params.project_key,
        &params.issue_type,
        &params.summary,
        &description,
        cancel,
      )
      .await;
    structured_result("create_issue", outcome)
  }
}

#[tool_handler]
impl ServerHandler for JiraMcpServer {
  fn get_info(&self) -> ServerInfo {
    ServerInfo {
      instructions: Some(
        "Jira MCP server. Use get_issue to fetch an issue by key, search_issues to run a JQL query, \
         add_comment to comment on an issue, and create_issue to open a new issue."
          .into(),
      ),
      capabilities: ServerCapabilities::builder().enable_tools().build(),
      server_info: Implementation {
        name: SERVER_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        ..Default::default()
      },
      ..Default::default()
    }
  }
}

/// First `limit` characters of `text`, with an ellipsis when truncated.
fn preview(text: &str, limit: usize) -> String {
  match text.char_indices().nth(limit) {
    Some((cut, _)) => format!("{}...", &text[..cut]),
    None => text.to_string(),
  }
}
