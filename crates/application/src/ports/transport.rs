//! HTTP transport port
//!
//! The transport owns request construction, timeout enforcement, header
//! merging, and response classification. Everything above it only ever sees
//! a [`ResponsePayload`] or an [`ApiError`].

use async_trait::async_trait;
use paperwall_domain::{ApiResult, RequestDescriptor, ResponsePayload};

/// Port for sending classified HTTP requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request and classifies the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`paperwall_domain::ApiError::Transport`] when no response was
    /// received (timeout, network loss) and
    /// [`paperwall_domain::ApiError::Api`] for non-2xx responses.
    async fn send(&self, request: RequestDescriptor) -> ApiResult<ResponsePayload>;

    /// Installs a default header applied to every subsequent request.
    ///
    /// Per-call headers win over defaults on key conflict. In-flight
    /// requests keep the headers they were built with.
    async fn set_default_header(&self, name: &str, value: &str);

    /// Removes a default header.
    async fn remove_default_header(&self, name: &str);
}

/// Hook invoked by the transport when a response comes back with status 401,
/// before the error propagates to the caller.
#[async_trait]
pub trait UnauthorizedHandler: Send + Sync {
    /// Reacts to an unauthorized response.
    async fn on_unauthorized(&self);
}
