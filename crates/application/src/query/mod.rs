//! Stateful query primitives
//!
//! Reactive state holders that wrap resource-client calls with loading,
//! error, and data state for a UI consumer. Each primitive allows at most
//! one in-flight request; parameter changes supersede rather than queue,
//! enforced by a generation token captured at initiation.

mod paged;
mod single;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use paperwall_domain::ApiResult;

pub use paged::{ImageListQuery, ListSnapshot, PaginationMode};
pub use single::{QuerySnapshot, ResourceQuery};

/// A boxed fetch in flight.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send>>;

/// A fetch function: given the current parameters, start one request.
pub type FetchFn<P, T> = Arc<dyn Fn(P) -> FetchFuture<T> + Send + Sync>;

/// Whether a parameter change warrants a refetch.
///
/// Deliberately a pure function rather than a framework watch mechanism:
/// the owning component calls it (or [`ResourceQuery::set_params`], which
/// applies it) whenever its inputs change.
#[must_use]
pub fn should_refetch<P: PartialEq>(old: &P, new: &P) -> bool {
    old != new
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_refetch_is_inequality() {
        assert!(!should_refetch(&("2024-01-01", "zh-CN"), &("2024-01-01", "zh-CN")));
        assert!(should_refetch(&("2024-01-01", "zh-CN"), &("2024-01-02", "zh-CN")));
        assert!(should_refetch(&("2024-01-01", "zh-CN"), &("2024-01-01", "en-US")));
    }
}
