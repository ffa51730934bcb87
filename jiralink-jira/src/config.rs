//! Connection settings for the Jira client.
//!
//! The settings are read once from the process environment at startup. The
//! parsing goes through a lookup function so it can be exercised without
//! touching the real environment.

use std::fmt;

use tracing::debug;
use url::Url;

use crate::consts::{ENV_JIRA_API_TOKEN, ENV_JIRA_INSTANCE_URL, ENV_JIRA_USER_EMAIL};
use crate::error::JiraError;

/// Validated Jira connection settings.
#[derive(Clone)]
pub struct JiraConfig {
  pub(crate) base_url: Url,
  pub(crate) email: String,
  pub(crate) api_token: String,
}

impl JiraConfig {
  /// Build a configuration from explicit values.
  ///
  /// Trailing slashes are stripped from `base_url` before it is validated as
  /// an absolute `http` or `https` URL.
  pub fn new(base_url: &str, email: impl Into<String>, api_token: impl Into<String>) -> Result<Self, JiraError> {
    let email = email.into();
    let api_token = api_token.into();

    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
      return Err(JiraError::Config(format!("{ENV_JIRA_INSTANCE_URL} must not be empty")));
    }
    if email.is_empty() || api_token.is_empty() {
      return Err(JiraError::Config(format!(
        "{ENV_JIRA_USER_EMAIL} and {ENV_JIRA_API_TOKEN} must not be empty"
      )));
    }

    Ok(Self {
      base_url: parse_base_url(trimmed)?,
      email,
      api_token,
    })
  }

  /// Read the configuration from `JIRA_INSTANCE_URL`, `JIRA_USER_EMAIL` and
  /// `JIRA_API_TOKEN`.
  pub fn from_env() -> Result<Self, JiraError> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Read the configuration through an arbitrary variable lookup.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, JiraError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let read = |name: &str| lookup(name).unwrap_or_default();
    let base_url = read(ENV_JIRA_INSTANCE_URL);
    let email = read(ENV_JIRA_USER_EMAIL);
    let api_token = read(ENV_JIRA_API_TOKEN);

    debug!("Load env: {ENV_JIRA_INSTANCE_URL}={base_url:?}");
    debug!("Load env: {ENV_JIRA_USER_EMAIL} (masked={:?})", mask_email(&email));
    debug!("Load env: {ENV_JIRA_API_TOKEN} ({})", token_info(&api_token));

    let missing: Vec<&str> = [
      (ENV_JIRA_INSTANCE_URL, &base_url),
      (ENV_JIRA_USER_EMAIL, &email),
      (ENV_JIRA_API_TOKEN, &api_token),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
      return Err(JiraError::Config(format!(
        "{} must be set (missing: {})",
        [ENV_JIRA_INSTANCE_URL, ENV_JIRA_USER_EMAIL, ENV_JIRA_API_TOKEN].join(", "),
        missing.join(", ")
      )));
    }

    Self::new(&base_url, email, api_token)
  }

  /// Base URL with trailing slashes removed.
  pub fn base_url(&self) -> &str {
    self.base_url.as_str().trim_end_matches('/')
  }
}

impl fmt::Debug for JiraConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JiraConfig")
      .field("base_url", &self.base_url())
      .field("email", &mask_email(&self.email))
      .field("api_token", &token_info(&self.api_token))
      .finish()
  }
}

fn parse_base_url(input: &str) -> Result<Url, JiraError> {
  let invalid = |reason: String| JiraError::InvalidBaseUrl {
    url: input.to_string(),
    reason,
  };

  let url = Url::parse(input).map_err(|e| invalid(e.to_string()))?;
  if !matches!(url.scheme(), "http" | "https") {
    return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
  }
  if url.cannot_be_a_base() || url.host_str().is_none() {
    return Err(invalid("missing host".to_string()));
  }
  if url.query().is_some() || url.fragment().is_some() {
    return Err(invalid("must not contain a query or fragment".to_string()));
  }

  Ok(url)
}

/// Mask the local part of an email address, keeping its first character and
/// the domain: `a***@example.com`.
pub(crate) fn mask_email(email: &str) -> String {
  let Some((user, domain)) = email.split_once('@') else {
    return email.to_string();
  };

  let mut chars = user.chars();
  match chars.next() {
    Some(first) if user.chars().count() > 1 => {
      format!("{first}{}@{domain}", "*".repeat(chars.count()))
    }
    _ => format!("*@{domain}"),
  }
}

/// Describe a secret without revealing it.
pub(crate) fn token_info(token: &str) -> String {
  format!("len={}", token.len())
}
