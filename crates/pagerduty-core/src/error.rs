//! Error types for PagerDuty operations.
//!
//! This module provides the error type shared by every PagerDuty client crate,
//! including HTTP status handling and the structured error body returned by the API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PagerDuty operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// PagerDuty could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// HTTP transport failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout waiting for PagerDuty: {0}")]
    Timeout(String),

    /// The API answered with a non-2xx status
    #[error("PagerDuty API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message (structured message when available, raw body otherwise)
        message: String,
        /// Structured error body, if the API returned one
        body: Option<ApiErrorBody>,
    },

    /// Response body was not valid JSON or did not match the expected shape
    #[error("Could not decode JSON response: {0}")]
    Decode(String),

    /// Response JSON was valid but lacked the expected root field
    #[error("JSON response does not have {0} field")]
    MissingField(String),

    /// Invalid resource identifier
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// Invalid endpoint or URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Specialized result type for PagerDuty operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error object returned by the PagerDuty API alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApiErrorBody {
    /// Human-readable error message
    #[serde(default)]
    pub message: Option<String>,
    /// PagerDuty error code
    #[serde(default)]
    pub code: Option<i64>,
    /// Additional error details
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

impl ApiErrorBody {
    /// Parses the `{"error": {...}}` envelope from a response body.
    ///
    /// Returns `None` when the body is not a PagerDuty error object.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<ApiErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error)
    }
}

impl Error {
    /// Builds an [`Error::Api`] from a status code and raw response body.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let parsed = ApiErrorBody::parse(body);
        let message = parsed
            .as_ref()
            .and_then(|error| error.message.clone())
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    "Unknown error".to_string()
                } else {
                    text
                }
            });

        Self::Api {
            status,
            message,
            body: parsed,
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Api { status, .. } => match status {
                400 => "BAD_REQUEST",
                401 | 403 => "UNAUTHORIZED",
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                429 => "RATE_LIMITED",
                500..=599 => "SERVER_ERROR",
                _ => "API_ERROR",
            },
            Self::Decode(_) => "DECODE_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }

    /// Returns the HTTP status for API failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns true if the failure happened before any HTTP response arrived.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_) | Self::HttpError(_) | Self::Timeout(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
