//! In-memory fakes of the ports, shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use paperwall_domain::{ApiResult, RequestDescriptor, ResponsePayload};

use crate::ports::{
    Clock, HttpTransport, KeyValueStore, LocaleSource, Navigator, StorageError,
};

/// Transport fake: records every descriptor and serves scripted results FIFO.
#[derive(Default)]
pub struct FakeTransport {
    results: tokio::sync::Mutex<VecDeque<ApiResult<ResponsePayload>>>,
    sent: tokio::sync::Mutex<Vec<RequestDescriptor>>,
    default_headers: tokio::sync::Mutex<HashMap<String, String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_result(&self, result: ApiResult<ResponsePayload>) {
        self.results.lock().await.push_back(result);
    }

    pub async fn push_json(&self, value: serde_json::Value) {
        self.push_result(Ok(ResponsePayload::Json(value))).await;
    }

    pub async fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().await.clone()
    }

    pub async fn default_header(&self, name: &str) -> Option<String> {
        self.default_headers.lock().await.get(name).cloned()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: RequestDescriptor) -> ApiResult<ResponsePayload> {
        self.sent.lock().await.push(request);
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(paperwall_domain::ApiError::transport("no scripted response")))
    }

    async fn set_default_header(&self, name: &str, value: &str) {
        self.default_headers
            .lock()
            .await
            .insert(name.to_string(), value.to_string());
    }

    async fn remove_default_header(&self, name: &str) {
        self.default_headers.lock().await.remove(name);
    }
}

/// Storage fake: a shared in-memory map.
#[derive(Clone, Default)]
pub struct FakeStorage {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for FakeStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.lock().unwrap_or_else(std::sync::PoisonError::into_inner).get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.map
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Navigator fake: tracks the current path and every navigation.
#[derive(Clone)]
pub struct FakeNavigator {
    path: Arc<Mutex<String>>,
    visits: Arc<Mutex<Vec<String>>>,
}

impl FakeNavigator {
    pub fn new(path: &str) -> Self {
        Self {
            path: Arc::new(Mutex::new(path.to_string())),
            visits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for FakeNavigator {
    fn current_path(&self) -> String {
        self.path
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn navigate_to(&self, path: &str) {
        *self
            .path
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = path.to_string();
        self.visits
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(path.to_string());
    }
}

/// Clock fake: a fixed timestamp.
#[derive(Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Locale source fake.
pub struct FakeLocaleSource(Option<String>);

impl FakeLocaleSource {
    pub fn new(locale: Option<&str>) -> Self {
        Self(locale.map(str::to_string))
    }
}

impl LocaleSource for FakeLocaleSource {
    fn locale(&self) -> Option<String> {
        self.0.clone()
    }
}
