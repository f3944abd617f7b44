//! Holiday lookup
//!
//! Best-effort enrichment from a public holiday endpoint on a different
//! host. Lookups fail soft: any failure logs a warning and yields `None`,
//! so callers never branch on an error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tokio::sync::RwLock;
use tracing::warn;

use paperwall_domain::{HolidayDay, Holidays, RequestDescriptor, ResponsePayload};

use crate::ports::HttpTransport;

/// Default holiday endpoint; `{base}/{year}.json` serves a year's table.
pub const DEFAULT_HOLIDAY_BASE_URL: &str = "https://api.coding.icu/cnholiday";

/// Cached, fail-soft holiday lookups.
pub struct HolidayService<T> {
    transport: Arc<T>,
    base_url: String,
    cache: RwLock<HashMap<i32, Holidays>>,
}

impl<T: HttpTransport> HolidayService<T> {
    /// Creates a service against the default endpoint.
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_base_url(transport, DEFAULT_HOLIDAY_BASE_URL)
    }

    /// Creates a service against a custom endpoint.
    pub fn with_base_url(transport: Arc<T>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The holiday table for a year, fetched once and cached.
    pub async fn holidays_for_year(&self, year: i32) -> Option<Holidays> {
        if let Some(cached) = self.cache.read().await.get(&year) {
            return Some(cached.clone());
        }

        let descriptor = RequestDescriptor::get(format!("{}/{year}.json", self.base_url));
        let payload = match self.transport.send(descriptor).await {
            Ok(payload) => payload,
            Err(error) => {
                warn!(year, %error, "holiday lookup failed");
                return None;
            }
        };

        let ResponsePayload::Json(value) = payload else {
            warn!(year, "holiday endpoint returned a non-JSON payload");
            return None;
        };
        match serde_json::from_value::<Holidays>(value) {
            Ok(holidays) => {
                self.cache.write().await.insert(year, holidays.clone());
                Some(holidays)
            }
            Err(error) => {
                warn!(year, %error, "holiday payload did not match the expected shape");
                None
            }
        }
    }

    /// The holiday entry for a specific date, if its year's table is
    /// available and contains one.
    pub async fn holiday_on(&self, date: NaiveDate) -> Option<HolidayDay> {
        self.holidays_for_year(date.year())
            .await
            .and_then(|holidays| holidays.day(date).cloned())
    }

    /// Drops all cached tables.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }
}
