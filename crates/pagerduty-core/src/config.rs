//! Configuration structures for PagerDuty clients.
//!
//! This module provides the validated connection settings (base URL, credentials,
//! timeouts) from which a [`ServiceClient`](crate::client::ServiceClient) is built.

use crate::types::DEFAULT_BASE_URL;
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// How the API credential is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// REST API key: `Authorization: Token token=<key>`
    #[default]
    Token,
    /// OAuth access token: `Authorization: Bearer <token>`
    Bearer,
}

impl AuthScheme {
    /// Render the header value for a credential.
    #[must_use]
    pub fn header_value(&self, credential: &str) -> String {
        match self {
            Self::Token => format!("Token token={credential}"),
            Self::Bearer => format!("Bearer {credential}"),
        }
    }
}

/// Configuration for a PagerDuty client instance.
///
/// The credential is held as a [`SecretString`]: it is redacted from `Debug` output and
/// never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PagerDutyConfig {
    /// REST API base URL
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key or OAuth token
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// How `token` is sent
    #[serde(default)]
    pub auth_scheme: AuthScheme,

    /// Requester e-mail sent in the `From` header
    #[validate(email)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Override for the `User-Agent` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl PagerDutyConfig {
    /// Create a new client configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set a REST API key.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self.auth_scheme = AuthScheme::Token;
        self
    }

    /// Set an OAuth bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self.auth_scheme = AuthScheme::Bearer;
        self
    }

    /// Set the requester e-mail.
    #[must_use]
    pub fn with_from_email(mut self, email: impl Into<String>) -> Self {
        self.from_email = Some(email.into());
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid PagerDuty URL: {e}")))
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] describing the offending fields.
    pub fn check(&self) -> Result<(), Error> {
        self.validate().map_err(Error::from)
    }
}

impl Default for PagerDutyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            auth_scheme: AuthScheme::default(),
            from_email: None,
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: None,
        }
    }
}
