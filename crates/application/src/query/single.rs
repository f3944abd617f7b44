//! Single-resource query
//!
//! idle → loading → ready | failed, re-run on parameter change with a
//! last-initiated-wins policy: a completion only writes state if no newer
//! fetch has been initiated since it started.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::warn;

use paperwall_domain::ApiError;

use super::{FetchFn, FetchFuture, should_refetch};

/// Observable state of a [`ResourceQuery`].
#[derive(Debug, Clone)]
pub struct QuerySnapshot<T> {
    /// The most recently fetched value, if any.
    pub value: Option<T>,
    /// True while a fetch is outstanding.
    pub loading: bool,
    /// The error of the last failed fetch; cleared when a new one starts.
    pub error: Option<ApiError>,
}

impl<T> Default for QuerySnapshot<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> QuerySnapshot<T> {
    /// Returns true when a value is present and nothing is in flight.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.value.is_some() && !self.loading
    }
}

/// A stateful single-resource fetch keyed by its parameters.
pub struct ResourceQuery<P, T> {
    fetch: FetchFn<P, T>,
    params: RwLock<P>,
    state: RwLock<QuerySnapshot<T>>,
    generation: AtomicU64,
}

impl<P, T> ResourceQuery<P, T>
where
    P: Clone + PartialEq + Send + Sync,
    T: Clone + Send + Sync,
{
    /// Creates a query with its initial parameters.
    ///
    /// Creation does not fetch; call [`ResourceQuery::refetch`] once the
    /// owner is mounted.
    pub fn new<F>(params: P, fetch: F) -> Self
    where
        F: Fn(P) -> FetchFuture<T> + Send + Sync + 'static,
    {
        Self {
            fetch: Arc::new(fetch),
            params: RwLock::new(params),
            state: RwLock::new(QuerySnapshot::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> QuerySnapshot<T> {
        self.state.read().await.clone()
    }

    /// A copy of the current parameters.
    pub async fn params(&self) -> P {
        self.params.read().await.clone()
    }

    /// Runs the fetch with the current parameters.
    ///
    /// Suppressed while a fetch is already outstanding; only parameter
    /// changes supersede an in-flight request.
    pub async fn refetch(&self) {
        {
            let mut state = self.state.write().await;
            if state.loading {
                return;
            }
            state.loading = true;
            state.error = None;
        }
        let generation = self.next_generation();
        let params = self.params.read().await.clone();
        self.run(generation, params).await;
    }

    /// Applies a parameter change.
    ///
    /// Unchanged parameters are a no-op. A real change always initiates a
    /// fetch, superseding any outstanding one: the older fetch still runs to
    /// completion, but its result is discarded.
    pub async fn set_params(&self, new: P) {
        {
            let mut params = self.params.write().await;
            if !should_refetch(&*params, &new) {
                return;
            }
            *params = new.clone();
        }
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }
        let generation = self.next_generation();
        self.run(generation, new).await;
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn run(&self, generation: u64, params: P) {
        let result = (self.fetch)(params).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            // Superseded while in flight; a newer fetch owns the state now.
            return;
        }
        match result {
            Ok(value) => {
                state.value = Some(value);
                state.error = None;
            }
            Err(error) => {
                warn!(%error, "resource fetch failed");
                state.error = Some(error);
            }
        }
        state.loading = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// A fetch whose completion is controlled by the test through oneshot
    /// senders, keyed by the requested parameter.
    struct ScriptedFetch {
        senders: Arc<Mutex<HashMap<&'static str, oneshot::Sender<Result<String, ApiError>>>>>,
        started: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ScriptedFetch {
        fn new() -> (Self, Arc<Mutex<Vec<&'static str>>>) {
            let started = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    senders: Arc::new(Mutex::new(HashMap::new())),
                    started: Arc::clone(&started),
                },
                started,
            )
        }

        fn fetch_fn(&self) -> impl Fn(&'static str) -> FetchFuture<String> + Send + Sync + 'static {
            let senders = Arc::clone(&self.senders);
            let started = Arc::clone(&self.started);
            move |params| {
                let (tx, rx) = oneshot::channel();
                senders.lock().unwrap().insert(params, tx);
                started.lock().unwrap().push(params);
                Box::pin(async move {
                    rx.await
                        .unwrap_or_else(|_| Err(ApiError::transport("sender dropped")))
                })
            }
        }

        fn resolve(&self, params: &'static str, result: Result<String, ApiError>) {
            let sender = self.senders.lock().unwrap().remove(params).unwrap();
            let _ = sender.send(result);
        }
    }

    #[tokio::test]
    async fn test_refetch_success() {
        let (scripted, _) = ScriptedFetch::new();
        let query = Arc::new(ResourceQuery::new("a", scripted.fetch_fn()));

        let worker = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.refetch().await }
        });
        tokio::task::yield_now().await;
        assert!(query.snapshot().await.loading);

        scripted.resolve("a", Ok("value-a".to_string()));
        worker.await.unwrap();

        let snapshot = query.snapshot().await;
        assert!(snapshot.is_ready());
        assert_eq!(snapshot.value.as_deref(), Some("value-a"));
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_refetch_suppressed_while_loading() {
        let (scripted, started) = ScriptedFetch::new();
        let query = Arc::new(ResourceQuery::new("a", scripted.fetch_fn()));

        let worker = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.refetch().await }
        });
        tokio::task::yield_now().await;

        // Re-entrant refetches while loading must not start new requests.
        query.refetch().await;
        query.refetch().await;
        assert_eq!(started.lock().unwrap().len(), 1);

        scripted.resolve("a", Ok("value-a".to_string()));
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_failure_is_captured() {
        let (scripted, _) = ScriptedFetch::new();
        let query = Arc::new(ResourceQuery::new("a", scripted.fetch_fn()));

        let worker = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.refetch().await }
        });
        tokio::task::yield_now().await;
        scripted.resolve("a", Err(ApiError::transport("offline")));
        worker.await.unwrap();

        let snapshot = query.snapshot().await;
        assert!(!snapshot.loading);
        assert!(snapshot.value.is_none());
        assert_eq!(snapshot.error.unwrap().status(), 0);
    }

    #[tokio::test]
    async fn test_unchanged_params_do_not_refetch() {
        let (scripted, started) = ScriptedFetch::new();
        let query = ResourceQuery::new("a", scripted.fetch_fn());

        query.set_params("a").await;
        assert!(started.lock().unwrap().is_empty());
        assert!(!query.snapshot().await.loading);
    }

    #[tokio::test]
    async fn test_last_initiated_wins() {
        let (scripted, started) = ScriptedFetch::new();
        let query = Arc::new(ResourceQuery::new("a", scripted.fetch_fn()));

        // Fetch A starts first.
        let worker_a = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.refetch().await }
        });
        tokio::task::yield_now().await;

        // Parameter change to B supersedes A while A is still in flight.
        let worker_b = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.set_params("b").await }
        });
        tokio::task::yield_now().await;
        assert_eq!(*started.lock().unwrap(), vec!["a", "b"]);

        // B completes before A.
        scripted.resolve("b", Ok("value-b".to_string()));
        worker_b.await.unwrap();
        assert_eq!(query.snapshot().await.value.as_deref(), Some("value-b"));

        // A resolves later in wall-clock time; its result must be discarded.
        scripted.resolve("a", Ok("value-a".to_string()));
        worker_a.await.unwrap();

        let snapshot = query.snapshot().await;
        assert_eq!(snapshot.value.as_deref(), Some("value-b"));
        assert_eq!(query.params().await, "b");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_superseding_failure_does_not_mask_newer_result() {
        let (scripted, _) = ScriptedFetch::new();
        let query = Arc::new(ResourceQuery::new("a", scripted.fetch_fn()));

        let worker_a = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.refetch().await }
        });
        tokio::task::yield_now().await;
        let worker_b = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.set_params("b").await }
        });
        tokio::task::yield_now().await;

        scripted.resolve("b", Ok("value-b".to_string()));
        worker_b.await.unwrap();
        // The stale failure from A is ignored.
        scripted.resolve("a", Err(ApiError::transport("late failure")));
        worker_a.await.unwrap();

        let snapshot = query.snapshot().await;
        assert_eq!(snapshot.value.as_deref(), Some("value-b"));
        assert!(snapshot.error.is_none());
    }
}
