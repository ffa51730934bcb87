//! Constants for the jiralink-jira client.

use std::time::Duration;

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jiralink/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the Jira instance base URL.
pub const ENV_JIRA_INSTANCE_URL: &str = "JIRA_INSTANCE_URL";

/// Environment variable holding the account email used for Basic auth.
pub const ENV_JIRA_USER_EMAIL: &str = "JIRA_USER_EMAIL";

/// Environment variable holding the Jira API token.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// Upper bound on any single request, including reading the response body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when the caller asks for nothing or something out of range.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// Largest page size forwarded to Jira unchanged.
pub const MAX_RESULTS_LIMIT: u32 = 1000;

/// Path segments of the v3 issue resource.
pub(crate) const ISSUE_SEGMENTS: [&str; 4] = ["rest", "api", "3", "issue"];

/// Path segments of the v3 search resource.
pub(crate) const SEARCH_SEGMENTS: [&str; 4] = ["rest", "api", "3", "search"];
