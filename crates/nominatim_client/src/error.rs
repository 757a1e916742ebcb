//! Nominatim error types
//!
//! Two families live here. [`NominatimError`] is returned when a client
//! cannot be constructed. [`CallFailure`] describes why a single API call
//! did not yield a payload; it is always delivered inside
//! [`ApiResult::Failure`](crate::ApiResult::Failure) and never as an `Err`.

use thiserror::Error;

/// Errors raised while configuring or constructing a client
#[derive(Debug, Error)]
pub enum NominatimError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Base URL could not be parsed or has no host
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A fixed header value contains characters not allowed in HTTP headers
    #[error("Invalid header value for {name}: {reason}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The HTTP transport could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An HTTP method token outside GET/POST/PUT/DELETE
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Why a call produced no payload
///
/// `Display` yields the flattened message callers historically matched on:
/// `HTTP Error: <code>` for status failures and `Exception: <description>`
/// for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallFailure {
    /// The server answered with a status other than 200 OK
    #[error("HTTP Error: {status}")]
    HttpStatus {
        /// Response status code
        status: u16,
    },

    /// Sending the request or reading the response failed
    #[error("Exception: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout
    #[error("Exception: request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// A 200 response carried a body that is not valid JSON
    #[error("Exception: {0}")]
    Parse(String),
}

impl CallFailure {
    /// Status code for [`CallFailure::HttpStatus`], `None` otherwise
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Flattened message, identical to the `Display` output
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Map a transport error, keeping timeouts distinguishable
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::Transport(err.to_string())
        }
    }
}
