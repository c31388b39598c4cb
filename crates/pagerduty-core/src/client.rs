//! HTTP client utilities.
//!
//! This module provides HTTP client configuration, the [`Transport`] seam used by the
//! resource layer, and [`ServiceClient`], the reqwest-backed transport that attaches
//! PagerDuty authentication and content negotiation headers.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, FROM};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{AuthScheme, PagerDutyConfig};
use crate::error::{Error, Result};
use crate::types::ACCEPT_HEADER;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

const USER_AGENT: &str = concat!("pagerduty-core/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
///
/// Configures timeouts and connection pooling of the underlying HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable request/response logging
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A request as seen by a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the base URL, e.g. `/escalation_policies/P1`
    pub path: String,
    /// Query pairs
    pub query: Vec<(String, String)>,
    /// JSON body for create/update
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request without query or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach query pairs.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A fully-read response.
///
/// The transport reads the body to completion before returning, so the underlying
/// connection is released exactly once whatever happens to the response afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw body bytes
    pub body: Bytes,
}

impl ApiResponse {
    /// Create a response from a status and body.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn non-2xx responses into [`Error::Api`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] carrying the status and any structured error body.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        let error = Error::from_status(self.status.as_u16(), &self.body);
        warn!(status = self.status.as_u16(), %error, "PagerDuty request failed");
        Err(error)
    }
}

/// Authenticated HTTP transport.
///
/// Implementations send one request and return the complete response, whatever its
/// status. Transport-level failures (DNS, connect, timeout) are returned as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and read the full response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    user_agent: String,
    credential: Option<(AuthScheme, SecretString)>,
    from: Option<String>,
}

impl ServiceClientBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(Url::parse(base_url.as_ref())?);

        Ok(Self {
            base_url,
            http_config: ClientConfig::new().with_timeout(timeout),
            user_agent: USER_AGENT.to_string(),
            credential: None,
            from: None,
        })
    }

    /// Create a builder from a validated [`PagerDutyConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(config: &PagerDutyConfig) -> Result<Self> {
        config.check()?;
        let base_url = normalize_base_url(config.parse_base_url()?);

        let mut builder = Self {
            base_url,
            http_config: ClientConfig::new().with_timeout(config.timeout()),
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| USER_AGENT.to_string()),
            credential: None,
            from: config.from_email.clone(),
        };

        if let Some(token) = &config.token {
            builder.credential = Some((config.auth_scheme, token.clone()));
        }

        Ok(builder)
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Authenticate with a REST API key.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credential = Some((AuthScheme::Token, SecretString::from(token.into())));
        self
    }

    /// Authenticate with an OAuth bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credential = Some((AuthScheme::Bearer, SecretString::from(token.into())));
        self
    }

    /// Send a `From` header with the requester's e-mail.
    #[must_use]
    pub fn with_from(mut self, email: impl Into<String>) -> Self {
        self.from = Some(email.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a header value is invalid or the HTTP client cannot be built.
    pub fn build(self) -> Result<ServiceClient> {
        let authorization = self
            .credential
            .as_ref()
            .map(|(scheme, token)| {
                let mut value = HeaderValue::from_str(&scheme.header_value(token.expose_secret()))
                    .map_err(|err| Error::ConfigError(format!("Invalid API token: {err}")))?;
                value.set_sensitive(true);
                Ok::<_, Error>(value)
            })
            .transpose()?;

        let from = self
            .from
            .as_deref()
            .map(|email| {
                HeaderValue::from_str(email)
                    .map_err(|err| Error::ConfigError(format!("Invalid From header: {err}")))
            })
            .transpose()?;

        let http = ClientBuilder::new()
            .user_agent(&self.user_agent)
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .gzip(self.http_config.enable_compression)
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(ServiceClient {
            http,
            base_url: self.base_url,
            authorization,
            from,
            enable_logging: self.http_config.enable_logging,
        })
    }
}

/// reqwest-backed [`Transport`] bound to one PagerDuty base URL.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: Url,
    authorization: Option<HeaderValue>,
    from: Option<HeaderValue>,
    enable_logging: bool,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.authorization.is_some())
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Start a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ServiceClientBuilder> {
        ServiceClientBuilder::new(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let normalized = path.strip_prefix('/').unwrap_or(path);

        self.base_url
            .join(normalized)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid PagerDuty path `{path}`: {err}")))
    }
}

#[async_trait]
impl Transport for ServiceClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.build_url(&request.path)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(ACCEPT, ACCEPT_HEADER);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(authorization) = &self.authorization {
            builder = builder.header(AUTHORIZATION, authorization.clone());
        }
        if let Some(from) = &self.from {
            builder = builder.header(FROM, from.clone());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        if self.enable_logging {
            info!(method = %request.method, path = %request.path, "PagerDuty request");
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if self.enable_logging {
            debug!(status = status.as_u16(), bytes = body.len(), "PagerDuty response");
        }

        Ok(ApiResponse { status, body })
    }
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
