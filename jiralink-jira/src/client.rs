//! # Jira HTTP Client
//!
//! HTTP plumbing shared by every Jira endpoint: URL construction, the cached
//! Basic authorization header, timeouts, cancellation, and mapping of HTTP
//! failures onto [`JiraError`].

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};
use url::{Position, Url};

use crate::config::JiraConfig;
use crate::consts::{REQUEST_TIMEOUT, USER_AGENT};
use crate::error::JiraError;

const APPLICATION_JSON: &str = "application/json";

/// Body placeholder for requests that send nothing.
pub(crate) const NO_BODY: Option<&()> = None;

/// Represents a Jira API client
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: Url,
  auth_header: HeaderValue,
}

impl JiraClient {
  /// Create a new Jira client with the default 30 second request timeout
  pub fn new(config: JiraConfig) -> Result<Self, JiraError> {
    Self::with_timeout(config, REQUEST_TIMEOUT)
  }

  /// Create a new Jira client with a custom per-request timeout
  pub fn with_timeout(config: JiraConfig, timeout: Duration) -> Result<Self, JiraError> {
    let client = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
    let auth_header = basic_auth_header(&config.email, &config.api_token)?;

    Ok(Self {
      client,
      base_url: config.base_url,
      auth_header,
    })
  }

  /// Resolve path segments against the base URL, percent-escaping each one.
  pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, JiraError> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|()| JiraError::InvalidBaseUrl {
        url: self.base_url.to_string(),
        reason: "cannot be used as a base".to_string(),
      })?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// Send a request and decode a JSON response body.
  pub(crate) async fn send_json<T, B>(
    &self,
    method: Method,
    url: Url,
    body: Option<&B>,
    cancel: &CancellationToken,
  ) -> Result<T, JiraError>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    let path = request_path(&url);
    let bytes = self.send(method.clone(), url, body, cancel).await?;
    serde_json::from_slice(&bytes).map_err(|source| JiraError::Decode { method, path, source })
  }

  /// Send a request and return the raw response body of a successful call.
  ///
  /// Statuses of 300 and above become [`JiraError::Remote`]. The request is
  /// abandoned as soon as `cancel` fires.
  pub(crate) async fn send<B>(
    &self,
    method: Method,
    url: Url,
    body: Option<&B>,
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, JiraError>
  where
    B: Serialize + ?Sized,
  {
    let path = request_path(&url);
    let payload = body
      .map(serde_json::to_vec)
      .transpose()
      .map_err(JiraError::Serialize)?;

    // Never log headers: they carry the credential.
    debug!("HTTP {method} {url}");

    let mut request = self
      .client
      .request(method.clone(), url)
      .header(AUTHORIZATION, self.auth_header.clone())
      .header(ACCEPT, APPLICATION_JSON);
    if let Some(payload) = payload {
      trace!("Jira request body: {}", String::from_utf8_lossy(&payload));
      request = request.header(CONTENT_TYPE, APPLICATION_JSON).body(payload);
    }

    tokio::select! {
      biased;
      () = cancel.cancelled() => {
        debug!("HTTP {method} {path} cancelled by caller");
        Err(JiraError::Cancelled { method: method.clone(), path: path.clone() })
      }
      result = round_trip(request, &method, &path) => result,
    }
  }
}

async fn round_trip(request: RequestBuilder, method: &Method, path: &str) -> Result<Vec<u8>, JiraError> {
  let response = request.send().await?;
  let status = response.status();
  debug!("HTTP -> {status}");

  if status.as_u16() >= 300 {
    let body = response.text().await.unwrap_or_default();
    warn!("Jira API error: {method} {path} returned HTTP {status}");
    return Err(JiraError::Remote {
      method: method.clone(),
      path: path.to_string(),
      status,
      body,
    });
  }

  Ok(response.bytes().await?.to_vec())
}

/// Path and query of a request URL, used in diagnostics.
fn request_path(url: &Url) -> String {
  url[Position::BeforePath..].to_string()
}

fn basic_auth_header(email: &str, api_token: &str) -> Result<HeaderValue, JiraError> {
  let encoded = STANDARD.encode(format!("{email}:{api_token}"));
  let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
    .map_err(|e| JiraError::Config(format!("invalid authorization header: {e}")))?;
  value.set_sensitive(true);
  Ok(value)
}
