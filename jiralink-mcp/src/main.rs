//! jiralink-mcp: MCP server exposing Jira issue lookup, JQL search,
//! commenting, and issue creation as tools over stdio.

mod context;
mod server;
mod tools;
mod types;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use jiralink_jira::{JiraClient, JiraConfig};
use rmcp::ServiceExt;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

use crate::context::ServerContext;
use crate::server::{JiraMcpServer, SERVER_NAME};

/// Legacy switch that forces debug logging regardless of `-v`.
const ENV_DEBUG: &str = "DEBUG";

#[derive(Parser)]
#[command(
  version,
  about = "MCP server for Jira issues",
  long_about = "MCP server for Jira issues.\n\n\
                Reads JIRA_INSTANCE_URL, JIRA_USER_EMAIL and JIRA_API_TOKEN from the environment \
                and serves the get_issue, search_issues, add_comment and create_issue tools over stdio."
)]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages\n\n\
             DEBUG=1 in the environment is equivalent to -vv."
  )]
  verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // Tracing to stderr: stdout is reserved for MCP JSON-RPC protocol.
  let debug_env = std::env::var(ENV_DEBUG).is_ok_and(|v| v == "1");
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(log_level(cli.verbose, debug_env).into()))
    .init();

  let config = JiraConfig::from_env().context("Failed to load Jira configuration")?;
  let jira = JiraClient::new(config).context("Failed to create Jira client")?;

  debug!("Starting MCP server: name={SERVER_NAME} version={}", env!("CARGO_PKG_VERSION"));
  let server = JiraMcpServer::new(ServerContext::new(jira));

  // Start MCP server on stdio
  let service = server
    .serve(rmcp::transport::io::stdio())
    .await
    .context("Failed to start MCP server on stdio")?;
  service.waiting().await.context("MCP server failed")?;

  Ok(())
}

/// Map `-v` occurrences (and the `DEBUG=1` switch) to a tracing level.
fn log_level(verbose: u8, debug_env: bool) -> Level {
  let verbose = if debug_env { verbose.max(2) } else { verbose };
  match verbose {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_verbose_flag_counts() {
    let cli = Cli::try_parse_from(["jiralink-mcp", "-vv"]).unwrap();
    assert_eq!(cli.verbose, 2);
  }

  #[test]
  fn test_log_level() {
    assert_eq!(log_level(0, false), Level::WARN);
    assert_eq!(log_level(1, false), Level::INFO);
    assert_eq!(log_level(2, false), Level::DEBUG);
    assert_eq!(log_level(7, false), Level::TRACE);
    assert_eq!(log_level(0, true), Level::DEBUG);
    assert_eq!(log_level(3, true), Level::TRACE);
  }
}
