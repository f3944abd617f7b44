//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It joins paths onto the
//! configured base URL, merges default and per-call headers, enforces the
//! timeout, classifies failures into the typed error, and decodes success
//! payloads by their declared content type.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tokio::sync::RwLock;
use url::Url;

use paperwall_application::ApiConfig;
use paperwall_application::ports::{HttpTransport, UnauthorizedHandler};
use paperwall_domain::{
    ApiError, ApiResult, BinaryBody, HttpMethod, RequestBody, RequestDescriptor, ResponsePayload,
    StatusCode,
};

/// HTTP transport backed by `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    default_timeout: Duration,
    default_headers: RwLock<HashMap<String, String>>,
    unauthorized_handler: RwLock<Option<Arc<dyn UnauthorizedHandler>>>,
}

impl ReqwestTransport {
    /// Creates a transport for the given client configuration.
    ///
    /// Default configuration:
    /// - `Content-Type: application/json` as the only default header
    /// - follow redirects: up to 10
    /// - User-Agent: "Paperwall/0.1.0"
    ///
    /// # Errors
    ///
    /// Returns a transport error if the underlying client cannot be built.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent("Paperwall/0.1.0")
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ApiError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            client,
            base_url: config.base_url.clone(),
            default_timeout: config.timeout,
            default_headers: RwLock::new(default_headers),
            unauthorized_handler: RwLock::new(None),
        }
    }

    /// Registers the handler invoked on 401 responses.
    ///
    /// Registration happens after construction so the session (which needs
    /// the transport for its Authorization header) and the transport can
    /// reference each other without a construction cycle.
    pub async fn set_unauthorized_handler(&self, handler: Arc<dyn UnauthorizedHandler>) {
        *self.unauthorized_handler.write().await = Some(handler);
    }

    /// Converts the domain method to a reqwest method.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Resolves the request URL: absolute paths go out unchanged, relative
    /// ones are joined onto the base URL.
    fn resolve_url(&self, descriptor: &RequestDescriptor) -> ApiResult<Url> {
        let raw = if descriptor.is_absolute() {
            descriptor.path.clone()
        } else {
            let path = if descriptor.path.starts_with('/') {
                descriptor.path.clone()
            } else {
                format!("/{}", descriptor.path)
            };
            format!("{}{}", self.base_url, path)
        };
        Url::parse(&raw).map_err(|e| ApiError::transport(format!("invalid URL {raw}: {e}")))
    }

    /// Merges default headers with per-call headers; per-call wins on
    /// key conflict (case-insensitive).
    fn merge_headers(
        defaults: &HashMap<String, String>,
        per_call: &HashMap<String, String>,
    ) -> Vec<(String, String)> {
        let mut merged: Vec<(String, String)> = defaults
            .iter()
            .filter(|(name, _)| {
                !per_call.keys().any(|k| k.eq_ignore_ascii_case(name))
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        merged.extend(per_call.iter().map(|(n, v)| (n.clone(), v.clone())));
        merged
    }

    /// Serializes the request body to its wire form.
    fn body_text(body: &RequestBody) -> ApiResult<String> {
        match body {
            RequestBody::Json(value) => serde_json::to_string(value)
                .map_err(|e| ApiError::transport(format!("failed to serialize body: {e}"))),
            RequestBody::Text(text) => Ok(text.clone()),
        }
    }

    /// Classifies a reqwest error as a transport failure.
    fn map_send_error(error: &reqwest::Error, timeout: Duration) -> ApiError {
        if error.is_timeout() {
            return ApiError::transport(format!(
                "request timed out after {} ms",
                timeout.as_millis()
            ));
        }
        ApiError::transport(error.to_string())
    }

    /// Builds the application error for a non-2xx response.
    fn error_from_parts(status: StatusCode, bytes: &[u8]) -> ApiError {
        let body = serde_json::from_slice(bytes).ok();
        ApiError::from_status(status, body)
    }

    /// Decodes a success body by its declared content type.
    fn decode_body(content_type: Option<&str>, bytes: Vec<u8>) -> ApiResult<ResponsePayload> {
        let parsed: Option<mime::Mime> = content_type.and_then(|ct| ct.parse().ok());

        if let Some(mime) = &parsed
            && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
        {
            return serde_json::from_slice(&bytes)
                .map(ResponsePayload::Json)
                .map_err(|e| ApiError::decode(format!("malformed JSON body: {e}")));
        }

        if parsed.as_ref().is_some_and(|mime| mime.type_() == mime::TEXT) {
            return Ok(ResponsePayload::Text(
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }

        Ok(ResponsePayload::Binary(BinaryBody {
            content_type: content_type.map(str::to_owned),
            bytes,
        }))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> ApiResult<ResponsePayload> {
        let url = self.resolve_url(&request)?;
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let headers = {
            let defaults = self.default_headers.read().await;
            Self::merge_headers(&defaults, &request.headers)
        };

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(timeout);
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body
            && request.method != HttpMethod::Get
        {
            builder = builder.body(Self::body_text(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e, timeout))?;

        let status = StatusCode::new(response.status().as_u16());
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(format!("failed to read body: {e}")))?
            .to_vec();

        if !status.is_success() {
            let error = Self::error_from_parts(status, &bytes);
            if status.is_unauthorized() {
                let handler = self.unauthorized_handler.read().await.clone();
                if let Some(handler) = handler {
                    handler.on_unauthorized().await;
                }
            }
            return Err(error);
        }

        Self::decode_body(content_type.as_deref(), bytes)
    }

    async fn set_default_header(&self, name: &str, value: &str) {
        self.default_headers
            .write()
            .await
            .insert(name.to_string(), value.to_string());
    }

    async fn remove_default_header(&self, name: &str) {
        let mut headers = self.default_headers.write().await;
        let keys: Vec<String> = headers
            .keys()
            .filter(|k| k.eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        for key in keys {
            headers.remove(&key);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&ApiConfig::new("https://paper.example.com/api/v1")).unwrap()
    }

    #[test]
    fn test_resolve_relative_url() {
        let transport = transport();
        let url = transport
            .resolve_url(&RequestDescriptor::get("/images"))
            .unwrap();
        assert_eq!(url.as_str(), "https://paper.example.com/api/v1/images");
    }

    #[test]
    fn test_resolve_absolute_url_bypasses_base() {
        let transport = transport();
        let url = transport
            .resolve_url(&RequestDescriptor::get("https://other.example.com/2024.json"))
            .unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/2024.json");
    }

    #[test]
    fn test_relative_base_is_a_transport_error() {
        let transport = ReqwestTransport::new(&ApiConfig::default()).unwrap();
        let result = transport.resolve_url(&RequestDescriptor::get("/images"));
        assert!(matches!(result, Err(ApiError::Transport { .. })));
    }

    #[test]
    fn test_per_call_header_wins() {
        let mut defaults = HashMap::new();
        defaults.insert("Content-Type".to_string(), "application/json".to_string());
        defaults.insert("Authorization".to_string(), "Bearer old".to_string());
        let mut per_call = HashMap::new();
        per_call.insert("content-type".to_string(), "text/plain".to_string());

        let merged = ReqwestTransport::merge_headers(&defaults, &per_call);
        let content_types: Vec<_> = merged
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(content_types[0].1, "text/plain");
        assert!(merged.iter().any(|(n, v)| n == "Authorization" && v == "Bearer old"));
    }

    #[test]
    fn test_json_body_serialized() {
        let text =
            ReqwestTransport::body_text(&RequestBody::Json(json!({"password": "x"}))).unwrap();
        assert_eq!(text, r#"{"password":"x"}"#);
    }

    #[test]
    fn test_text_body_passes_through() {
        let text =
            ReqwestTransport::body_text(&RequestBody::Text("a=1&b=2".to_string())).unwrap();
        assert_eq!(text, "a=1&b=2");
    }

    #[test]
    fn test_error_prefers_server_message() {
        let error = ReqwestTransport::error_from_parts(
            StatusCode::new(404),
            br#"{"message": "no image for that date"}"#,
        );
        assert_eq!(error.message(), "no image for that date");
        assert_eq!(error.status(), 404);
    }

    #[test]
    fn test_error_synthesizes_status_line() {
        let error = ReqwestTransport::error_from_parts(StatusCode::new(502), b"<html>boom</html>");
        assert_eq!(error.message(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_decode_json_payload() {
        let payload = ReqwestTransport::decode_body(
            Some("application/json; charset=utf-8"),
            br#"{"date": "2024-01-01"}"#.to_vec(),
        )
        .unwrap();
        assert_eq!(
            payload.as_json().and_then(|v| v.get("date")).and_then(|v| v.as_str()),
            Some("2024-01-01")
        );
    }

    #[test]
    fn test_decode_declared_json_must_parse() {
        let result =
            ReqwestTransport::decode_body(Some("application/json"), b"not json".to_vec());
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[test]
    fn test_decode_text_payload() {
        let payload = ReqwestTransport::decode_body(
            Some("text/plain; charset=utf-8"),
            b"pong".to_vec(),
        )
        .unwrap();
        assert_eq!(payload.as_text(), Some("pong"));
    }

    #[test]
    fn test_decode_binary_payload_passes_through() {
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let payload = ReqwestTransport::decode_body(Some("image/jpeg"), bytes.clone()).unwrap();
        match payload {
            ResponsePayload::Binary(body) => {
                assert_eq!(body.content_type.as_deref(), Some("image/jpeg"));
                assert_eq!(body.bytes, bytes);
            }
            other => panic!("expected binary payload, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_without_content_type_is_binary() {
        let payload = ReqwestTransport::decode_body(None, b"??".to_vec()).unwrap();
        assert!(matches!(payload, ResponsePayload::Binary(_)));
    }

    #[tokio::test]
    async fn test_default_header_lifecycle() {
        let transport = transport();
        transport.set_default_header("Authorization", "Bearer t").await;
        transport.remove_default_header("authorization").await;
        let defaults = transport.default_headers.read().await;
        assert!(!defaults.keys().any(|k| k.eq_ignore_ascii_case("authorization")));
    }
}
