//! Error types for the GLPI client.
//!
//! This module defines `GlpiError`, the unified error type used throughout
//! the crate. GLPI reports most failures through a small status-code
//! vocabulary (206, 207, 400, 401, 204); each of those codes gets its own
//! variant so callers can branch on the kind of failure instead of parsing
//! log text.
//!
//! # Security
//!
//! Error messages must never leak the account password, the application
//! token or the session token. Use `sanitize_message()` when constructing
//! messages from external sources.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all GLPI operations.
///
/// The status-code variants mirror how the GLPI REST API signals failure:
/// `PartialContent` (206) means the server answered with a truncated result
/// set, `MultiStatus` (207) means a batch write partially succeeded, and
/// `NoContent` (204) is how a delete reports that nothing was touched. All
/// three are failures from this client's point of view.
#[derive(Error, Debug)]
pub enum GlpiError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Server answered 206: the result set is truncated.
    ///
    /// The partial body is carried for diagnostics but is never handed to
    /// callers as a success value.
    #[error("partial content (HTTP 206): {body}")]
    PartialContent {
        /// The truncated response body.
        body: String,
    },

    /// Server answered 207: a batch write partially succeeded.
    #[error("multi-status (HTTP 207): {body}")]
    MultiStatus {
        /// The per-entry status body returned by GLPI.
        body: String,
    },

    /// Server answered 400 with a diagnostic body.
    #[error("bad request (HTTP 400): {body}")]
    BadRequest {
        /// GLPI's error message, usually a `["ERROR_...", "..."]` pair.
        body: String,
    },

    /// Server answered 401 - missing, expired or invalid tokens.
    #[error("unauthorized (HTTP 401) - check the session and app tokens")]
    Unauthorized,

    /// Server answered 204 where a body was expected.
    #[error("no content (HTTP 204)")]
    NoContent,

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// A document download response carried no `Content-Disposition` header.
    #[error("download response has no Content-Disposition header")]
    MissingDisposition,

    /// The server-supplied filename cannot be used as a local file name.
    #[error("invalid download filename: {0}")]
    InvalidFilename(String),

    /// Local file I/O failed (document upload read or download write).
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GlpiError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        GlpiError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GlpiError::Config(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        GlpiError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// The HTTP status this error corresponds to, if it maps to one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GlpiError::PartialContent { .. } => Some(StatusCode::PARTIAL_CONTENT),
            GlpiError::MultiStatus { .. } => Some(StatusCode::MULTI_STATUS),
            GlpiError::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            GlpiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            GlpiError::NoContent => Some(StatusCode::NO_CONTENT),
            GlpiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error came from the server rather than from
    /// transport, decoding or local I/O.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some()
    }

    /// Sanitizes a message to remove any occurrence of a secret.
    ///
    /// Passwords and tokens must never appear in logs, error messages, or
    /// responses to users.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `secret` - The secret to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the secret replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
