//! Resource client
//!
//! A thin typed catalog over the backend surface: one method per endpoint,
//! each shaping a request descriptor from typed arguments and decoding the
//! typed payload. No business logic lives here.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use paperwall_domain::{
    ApiError, ApiResult, ChangePasswordRequest, CreateTokenRequest, ImageFormat, ImageListParams,
    ImageMeta, ImageVariant, LoginRequest, ManualFetchRequest, RequestDescriptor, ResponsePayload,
    ServiceConfig, StatusMessage, Token, UpdateTokenRequest,
};

use crate::ports::HttpTransport;

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "PAPERWALL_API_BASE_URL";
/// Base URL used when the environment does not provide one.
pub const DEFAULT_BASE_URL: &str = "/api/v1";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration shared by the transport and the URL builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Default per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration with the given base URL, stripping a trailing
    /// slash.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the base URL from the environment, defaulting to
    /// [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Typed facade over the backend endpoints.
pub struct ApiService<T> {
    transport: Arc<T>,
    config: ApiConfig,
}

impl<T: HttpTransport> ApiService<T> {
    /// Creates a service over the given transport.
    pub const fn new(transport: Arc<T>, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    /// The configuration this service was built with.
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn request<D: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> ApiResult<D> {
        match self.transport.send(descriptor).await? {
            ResponsePayload::Json(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::decode(format!("unexpected response shape: {e}"))),
            ResponsePayload::Text(_) => Err(ApiError::decode("expected JSON, got text")),
            ResponsePayload::Binary(_) => Err(ApiError::decode("expected JSON, got binary data")),
        }
    }

    fn json_body<B: Serialize>(body: &B) -> ApiResult<serde_json::Value> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::transport(format!("failed to encode request body: {e}")))
    }

    // ----- auth -----

    /// Logs in with the administrator password, returning a session token.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<Token> {
        let body = Self::json_body(request)?;
        self.request(RequestDescriptor::post("/admin/login").with_json(body))
            .await
    }

    /// Changes the administrator password.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ApiResult<StatusMessage> {
        let body = Self::json_body(request)?;
        self.request(RequestDescriptor::post("/admin/password").with_json(body))
            .await
    }

    // ----- token management -----

    /// Lists all API tokens.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn tokens(&self) -> ApiResult<Vec<Token>> {
        self.request(RequestDescriptor::get("/admin/tokens")).await
    }

    /// Creates an API token.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn create_token(&self, request: &CreateTokenRequest) -> ApiResult<Token> {
        let body = Self::json_body(request)?;
        self.request(RequestDescriptor::post("/admin/tokens").with_json(body))
            .await
    }

    /// Updates an API token by id.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn update_token(
        &self,
        id: i64,
        request: &UpdateTokenRequest,
    ) -> ApiResult<StatusMessage> {
        let body = Self::json_body(request)?;
        self.request(RequestDescriptor::patch(format!("/admin/tokens/{id}")).with_json(body))
            .await
    }

    /// Deletes an API token by id.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn delete_token(&self, id: i64) -> ApiResult<StatusMessage> {
        self.request(RequestDescriptor::delete(format!("/admin/tokens/{id}")))
            .await
    }

    // ----- configuration -----

    /// Fetches the backend configuration document.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn service_config(&self) -> ApiResult<ServiceConfig> {
        self.request(RequestDescriptor::get("/admin/config")).await
    }

    /// Replaces the backend configuration document.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn replace_service_config(&self, config: &ServiceConfig) -> ApiResult<ServiceConfig> {
        let body = Self::json_body(config)?;
        self.request(RequestDescriptor::put("/admin/config").with_json(body))
            .await
    }

    // ----- administrative triggers -----

    /// Triggers a manual fetch, optionally for a number of past days.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn manual_fetch(
        &self,
        request: Option<&ManualFetchRequest>,
    ) -> ApiResult<StatusMessage> {
        let mut descriptor = RequestDescriptor::post("/admin/fetch");
        if let Some(request) = request {
            descriptor = descriptor.with_json(Self::json_body(request)?);
        }
        self.request(descriptor).await
    }

    /// Triggers a manual cleanup of images past retention.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn manual_cleanup(&self) -> ApiResult<StatusMessage> {
        self.request(RequestDescriptor::post("/admin/cleanup"))
            .await
    }

    // ----- images -----

    /// Lists image metadata with pagination and filters.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn images(&self, params: &ImageListParams) -> ApiResult<Vec<ImageMeta>> {
        let path = if params.is_empty() {
            "/images".to_string()
        } else {
            let query = serde_urlencoded::to_string(params)
                .map_err(|e| ApiError::transport(format!("failed to encode query: {e}")))?;
            format!("/images?{query}")
        };
        self.request(RequestDescriptor::get(path)).await
    }

    /// Fetches today's image metadata, optionally for a specific region.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn today_image(&self, mkt: Option<&str>) -> ApiResult<ImageMeta> {
        self.request(RequestDescriptor::get(Self::meta_path("/image/today/meta", mkt)?))
            .await
    }

    /// Fetches image metadata for a specific date, optionally for a
    /// specific region.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn image_by_date(&self, date: NaiveDate, mkt: Option<&str>) -> ApiResult<ImageMeta> {
        let path = format!("/image/date/{}/meta", date.format("%Y-%m-%d"));
        self.request(RequestDescriptor::get(Self::meta_path(&path, mkt)?))
            .await
    }

    /// Fetches metadata for a random stored image, optionally restricted to
    /// a region.
    ///
    /// # Errors
    ///
    /// Propagates the classified transport or application failure.
    pub async fn random_image(&self, mkt: Option<&str>) -> ApiResult<ImageMeta> {
        self.request(RequestDescriptor::get(Self::meta_path("/image/random/meta", mkt)?))
            .await
    }

    fn meta_path(path: &str, mkt: Option<&str>) -> ApiResult<String> {
        match mkt {
            None => Ok(path.to_string()),
            Some(mkt) => {
                let query = serde_urlencoded::to_string([("mkt", mkt)])
                    .map_err(|e| ApiError::transport(format!("failed to encode query: {e}")))?;
                Ok(format!("{path}?{query}"))
            }
        }
    }

    // ----- image binary URL builders (no network) -----

    /// Builds the URL of today's image binary.
    #[must_use]
    pub fn today_image_url(&self, variant: ImageVariant, format: ImageFormat) -> String {
        self.binary_url("/image/today", variant, format)
    }

    /// Builds the URL of a specific date's image binary.
    #[must_use]
    pub fn image_url_by_date(
        &self,
        date: NaiveDate,
        variant: ImageVariant,
        format: ImageFormat,
    ) -> String {
        self.binary_url(
            &format!("/image/date/{}", date.format("%Y-%m-%d")),
            variant,
            format,
        )
    }

    /// Builds the URL of a random image binary.
    #[must_use]
    pub fn random_image_url(&self, variant: ImageVariant, format: ImageFormat) -> String {
        self.binary_url("/image/random", variant, format)
    }

    fn binary_url(&self, path: &str, variant: ImageVariant, format: ImageFormat) -> String {
        // Both values are fixed enum spellings; no percent-encoding needed.
        format!(
            "{}{}?variant={}&format={}",
            self.config.base_url,
            path,
            variant.as_str(),
            format.as_str()
        )
    }
}
