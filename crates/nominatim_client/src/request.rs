//! Request description
//!
//! A [`RequestSpec`] is plain data: method, endpoint path, encoded query and
//! the fixed header set. It is built fresh for every call and consumed by
//! [`NominatimClient::execute`](crate::NominatimClient::execute).

use std::fmt;
use std::str::FromStr;

use crate::error::NominatimError;

/// HTTP method for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Canonical method token
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = NominatimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Get, Self::Post, Self::Put, Self::Delete]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NominatimError::UnsupportedMethod(s.to_string()))
    }
}

/// Nominatim API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Reverse,
    Lookup,
    Details,
    Status,
}

impl Endpoint {
    /// Path relative to the base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Search => "/search",
            Self::Reverse => "/reverse",
            Self::Lookup => "/lookup",
            Self::Details => "/details",
            Self::Status => "/status",
        }
    }
}

/// Content type sent with every request
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Headers attached to every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHeaders {
    host: String,
    user_agent: String,
}

impl FixedHeaders {
    /// Create the header set from the target host and the User-Agent value
    #[must_use]
    pub fn new(host: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Host header value
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// User-Agent header value
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// All headers as `(name, value)` pairs
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("Host", self.host.as_str()),
            ("Content-Type", CONTENT_TYPE_JSON),
            ("User-Agent", self.user_agent.as_str()),
        ]
    }
}

/// An immutable request description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    method: HttpMethod,
    path: &'static str,
    query: String,
    headers: FixedHeaders,
}

impl RequestSpec {
    /// Build a request for `endpoint` with an already encoded query string
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: Endpoint, query: String, headers: FixedHeaders) -> Self {
        Self {
            method,
            path: endpoint.path(),
            query,
            headers,
        }
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Encoded query string including the leading `?`, or empty
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn headers(&self) -> &FixedHeaders {
        &self.headers
    }

    /// Path and query, relative to the base URL
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}{}", self.path, self.query)
    }
}
