//! Paginated image list query
//!
//! Accumulates pages of image metadata with composable month/region filters
//! and load-more semantics. A failed page fetch never rolls back what was
//! already accumulated.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::warn;

use paperwall_domain::{ApiError, ImageListParams, ImageMeta};

use super::FetchFn;

/// How pages are addressed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// `limit`/`offset` pairs; a short page means the end was reached.
    #[default]
    OffsetLimit,
    /// 1-based `page`/`page_size` pairs; any page not exactly full means the
    /// end was reached.
    PageSize,
}

/// Observable state of an [`ImageListQuery`].
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    /// All accumulated items, in fetch order.
    pub items: Vec<ImageMeta>,
    /// Pagination cursor: the next offset (offset/limit mode) or the next
    /// 1-based page number (page/page_size mode).
    pub cursor: u32,
    /// False once the backend returned a short page.
    pub has_more: bool,
    /// Active month filter, `YYYY-MM`.
    pub month: Option<String>,
    /// Active region filter.
    pub mkt: Option<String>,
    /// True while a page fetch is outstanding.
    pub loading: bool,
    /// The error of the last failed page fetch.
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone)]
struct ListState {
    items: Vec<ImageMeta>,
    cursor: u32,
    has_more: bool,
    month: Option<String>,
    mkt: Option<String>,
    loading: bool,
    error: Option<ApiError>,
}

impl ListState {
    fn fresh(mode: PaginationMode, month: Option<String>, mkt: Option<String>) -> Self {
        Self {
            items: Vec::new(),
            cursor: first_cursor(mode),
            has_more: true,
            month,
            mkt,
            loading: false,
            error: None,
        }
    }
}

const fn first_cursor(mode: PaginationMode) -> u32 {
    match mode {
        PaginationMode::OffsetLimit => 0,
        PaginationMode::PageSize => 1,
    }
}

/// A stateful, filterable, load-more image listing.
pub struct ImageListQuery {
    fetch: FetchFn<ImageListParams, Vec<ImageMeta>>,
    mode: PaginationMode,
    page_size: u32,
    state: RwLock<ListState>,
    generation: AtomicU64,
}

impl ImageListQuery {
    /// Creates a query in the given pagination mode.
    pub fn new<F>(mode: PaginationMode, page_size: u32, fetch: F) -> Self
    where
        F: Fn(ImageListParams) -> super::FetchFuture<Vec<ImageMeta>> + Send + Sync + 'static,
    {
        Self {
            fetch: std::sync::Arc::new(fetch),
            mode,
            page_size,
            state: RwLock::new(ListState::fresh(mode, None, None)),
            generation: AtomicU64::new(0),
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.state.read().await;
        ListSnapshot {
            items: state.items.clone(),
            cursor: state.cursor,
            has_more: state.has_more,
            month: state.month.clone(),
            mkt: state.mkt.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Fetches the next page.
    ///
    /// A no-op while a fetch is outstanding or once the list is exhausted,
    /// so repeated scroll events de-duplicate into one request.
    pub async fn load_more(&self) {
        let (generation, params) = {
            let mut state = self.state.write().await;
            if state.loading || !state.has_more {
                return;
            }
            state.loading = true;
            state.error = None;
            (self.next_generation(), self.page_params(&state))
        };
        self.run(generation, params).await;
    }

    /// Replaces the month filter, keeping the region filter, and restarts
    /// from the first page.
    pub async fn filter_by_month(&self, month: Option<String>) {
        let mkt = self.state.read().await.mkt.clone();
        self.reset_and_fetch(month, mkt).await;
    }

    /// Replaces the region filter, keeping the month filter, and restarts
    /// from the first page.
    pub async fn filter_by_region(&self, mkt: Option<String>) {
        let month = self.state.read().await.month.clone();
        self.reset_and_fetch(month, mkt).await;
    }

    /// Re-runs the current filter set from the first page, discarding all
    /// accumulated state.
    pub async fn refetch(&self) {
        let (month, mkt) = {
            let state = self.state.read().await;
            (state.month.clone(), state.mkt.clone())
        };
        self.reset_and_fetch(month, mkt).await;
    }

    async fn reset_and_fetch(&self, month: Option<String>, mkt: Option<String>) {
        let (generation, params) = {
            let mut state = self.state.write().await;
            *state = ListState::fresh(self.mode, month, mkt);
            state.loading = true;
            // The reset supersedes any in-flight page of the old filter set.
            (self.next_generation(), self.page_params(&state))
        };
        self.run(generation, params).await;
    }

    fn page_params(&self, state: &ListState) -> ImageListParams {
        let mut params = ImageListParams {
            month: state.month.clone(),
            mkt: state.mkt.clone(),
            ..Default::default()
        };
        match self.mode {
            PaginationMode::OffsetLimit => {
                params.limit = Some(self.page_size);
                params.offset = Some(state.cursor);
            }
            PaginationMode::PageSize => {
                params.page = Some(state.cursor);
                params.page_size = Some(self.page_size);
            }
        }
        params
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn run(&self, generation: u64, params: ImageListParams) {
        let first_page = match self.mode {
            PaginationMode::OffsetLimit => params.offset == Some(0),
            PaginationMode::PageSize => params.page == Some(1),
        };
        let result = (self.fetch)(params).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            // A filter change or refetch superseded this page.
            return;
        }
        match result {
            Ok(page) => {
                let returned = page.len() as u32;
                state.has_more = match self.mode {
                    PaginationMode::OffsetLimit => returned >= self.page_size,
                    PaginationMode::PageSize => returned == self.page_size,
                };
                if first_page {
                    state.items = page;
                } else {
                    state.items.extend(page);
                }
                state.cursor = match self.mode {
                    PaginationMode::OffsetLimit => state.cursor + returned,
                    PaginationMode::PageSize => state.cursor + 1,
                };
                state.error = None;
            }
            Err(error) => {
                // Accumulated items stay; the caller surfaces the error.
                warn!(%error, "image page fetch failed");
                state.error = Some(error);
            }
        }
        state.loading = false;
    }
}
