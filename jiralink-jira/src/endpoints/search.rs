//! # Jira Search Endpoint
//!
//! JQL search returning a single bounded page of issues.

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::client::{JiraClient, NO_BODY};
use crate::consts::{DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT, SEARCH_SEGMENTS};
use crate::error::JiraError;
use crate::models::SearchResult;

impl JiraClient {
  /// Search issues with JQL, returning one page of at most `max_results`
  /// issues. See [`normalize_max_results`] for how the page size is chosen.
  #[instrument(skip(self, cancel), level = "debug")]
  pub async fn search(
    &self,
    jql: &str,
    max_results: Option<i64>,
    cancel: &CancellationToken,
  ) -> Result<SearchResult, JiraError> {
    let page_size = normalize_max_results(max_results);
    debug!("Searching Jira with page size {page_size}");

    let mut url = self.endpoint(&SEARCH_SEGMENTS)?;
    url
      .query_pairs_mut()
      .append_pair("jql", jql)
      .append_pair("maxResults", &page_size.to_string());

    self.send_json(Method::GET, url, NO_BODY, cancel).await
  }
}

/// Page size actually sent to Jira.
///
/// Missing, non-positive, and over-limit values fall back to
/// [`DEFAULT_MAX_RESULTS`] instead of being rejected, so callers that pass
/// junk still get a result.
pub(crate) fn normalize_max_results(max_results: Option<i64>) -> u32 {
  max_results
    .filter(|n| (1..=i64::from(MAX_RESULTS_LIMIT)).contains(n))
    .and_then(|n| u32::try_from(n).ok())
    .unwrap_or(DEFAULT_MAX_RESULTS)
}
