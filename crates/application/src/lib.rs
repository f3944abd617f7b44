//! Paperwall Application - Reactive data-fetching core
//!
//! The layer between a UI surface and the wallpaper backend: ports for the
//! outside world, the auth session, the region resolver, the typed resource
//! client, and the stateful query primitives that feed loading/error/data
//! state to consumers.

pub mod client;
pub mod holiday;
pub mod locale;
pub mod ports;
pub mod query;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiConfig, ApiService, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use holiday::{DEFAULT_HOLIDAY_BASE_URL, HolidayService};
pub use locale::{RegionRegistry, SELECTED_REGION_KEY};
pub use query::{
    FetchFn, FetchFuture, ImageListQuery, ListSnapshot, PaginationMode, QuerySnapshot,
    ResourceQuery, should_refetch,
};
pub use session::{AuthSession, TOKEN_EXPIRES_KEY, TOKEN_KEY};
