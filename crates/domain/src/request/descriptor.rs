//! Request descriptor
//!
//! A descriptor captures everything the transport needs for one call.
//! Descriptors are constructed fresh per invocation and never reused.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use super::HttpMethod;

/// The body of an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// A structured body, serialized to JSON text by the transport.
    Json(Value),
    /// A pre-formatted body, passed through unchanged.
    Text(String),
}

/// A single outgoing request: path, method, header overrides, body, timeout.
///
/// The `path` is relative to the client's base URL unless it is an absolute
/// `http(s)` URL, which the transport sends as-is (auxiliary lookups target
/// other hosts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Endpoint path, e.g. `/images`.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Per-call headers; these win over the transport's defaults on conflict.
    pub headers: HashMap<String, String>,
    /// Optional request body.
    pub body: Option<RequestBody>,
    /// Per-call timeout override; the transport default applies when unset.
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Creates a descriptor with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Creates a GET descriptor.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST descriptor.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT descriptor.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a PATCH descriptor.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Creates a DELETE descriptor.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_json(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Adds a per-call header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Overrides the transport's default timeout for this call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns true if the path is an absolute URL that must bypass
    /// base-URL joining.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }
}
