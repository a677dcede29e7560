//! # Resource
//!
//! A data hook: one service call plus the `FetchState` a view renders.
//!
//! - `fetch()` spawns the request on the tokio runtime and returns at once
//! - at most one request is in flight; a new `fetch()` aborts the previous one
//! - dropping the `Resource` aborts its request, and a response that still
//!   arrives afterwards is discarded
//! - failures become a message in `error`, nothing is retried automatically

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::io::api::ApiResult;
use crate::state::fetch_state::FetchState;

pub type FetchFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'static>>;
type Fetcher<T> = Arc<dyn Fn() -> FetchFuture<T> + Send + Sync>;

struct Shared<T> {
    state: FetchState<T>,
    /// Bumped on every fetch and on drop; stale responses carry an old value
    generation: u64,
}

/// Read-only view of a resource's state, cheap to clone into views
pub struct StateHandle<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T> Clone for StateHandle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone> StateHandle<T> {
    pub fn snapshot(&self) -> FetchState<T> {
        lock(&self.shared).state.clone()
    }
}

pub struct Resource<T> {
    name: &'static str,
    shared: Arc<Mutex<Shared<T>>>,
    fetcher: Fetcher<T>,
    in_flight: Option<JoinHandle<()>>,
}

fn lock<T>(shared: &Mutex<Shared<T>>) -> MutexGuard<'_, Shared<T>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Send + 'static> Resource<T> {
    pub fn new<F, Fut>(name: &'static str, fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        Self {
            name,
            shared: Arc::new(Mutex::new(Shared {
                state: FetchState::new(),
                generation: 0,
            })),
            fetcher: Arc::new(move || Box::pin(fetcher()) as FetchFuture<T>),
            in_flight: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Start the request. Must be called from inside a tokio runtime.
    pub fn fetch(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("Aborting in-flight {} request", self.name);
            }
            previous.abort();
        }

        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.state.begin();
            shared.generation
        };

        let name = self.name;
        let shared = Arc::clone(&self.shared);
        let request = (self.fetcher)();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = request.await;

            let mut shared = lock(&shared);
            if shared.generation != generation {
                debug!("Discarding stale {} response", name);
                return;
            }
            match outcome {
                Ok(data) => shared.state.succeed(data),
                Err(e) => {
                    warn!("Failed to fetch {}: {}", name, e);
                    shared.state.fail(e.to_string());
                }
            }
        }));
    }

    /// Same as `fetch`; what the view's "try again" button calls
    pub fn retry(&mut self) {
        self.fetch();
    }

    /// Wait for the in-flight request, if any, to settle
    pub async fn wait(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            // an aborted task has nothing to report
            let _ = handle.await;
        }
    }

    /// `fetch` and wait for the outcome
    pub async fn load(&mut self) {
        self.fetch();
        self.wait().await;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn clear_error(&self) {
        lock(&self.shared).state.clear_error();
    }

    /// Reset to the initial empty state, abandoning any request
    pub fn clear(&mut self) {
        self.cancel();
        lock(&self.shared).state.clear();
    }

    pub fn handle(&self) -> StateHandle<T> {
        StateHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.state.is_loading = false;
    }
}

impl<T: Clone + Send + 'static> Resource<T> {
    pub fn snapshot(&self) -> FetchState<T> {
        lock(&self.shared).state.clone()
    }
}

impl<T> Drop for Resource<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.state.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::api::ApiError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn counting_resource(delay_ms: u64, fail_first: bool) -> (Resource<u32>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let resource = Resource::new("counter", move || {
            let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                if fail_first && call == 1 {
                    Err(ApiError::Rejected("Service unavailable".to_string()))
                } else {
                    Ok(call)
                }
            }
        });
        (resource, calls)
    }

    #[tokio::test]
    async fn test_fetch_marks_loading_then_stores_data() {
        let (mut resource, _) = counting_resource(20, false);
        resource.fetch();

        let state = resource.snapshot();
        assert!(state.is_loading);
        assert!(resource.is_in_flight());

        resource.wait().await;
        let state = resource.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(1));
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let (mut resource, calls) = counting_resource(0, true);

        resource.load().await;
        let failed = resource.snapshot();
        assert_eq!(failed.error.as_deref(), Some("Service unavailable"));
        assert_eq!(failed.data, None);

        resource.retry();
        resource.wait().await;
        let recovered = resource.snapshot();
        assert_eq!(recovered.data, Some(2));
        assert_eq!(recovered.error, None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refetch_supersedes_in_flight_request() {
        let (mut resource, calls) = counting_resource(50, false);
        resource.fetch();
        resource.fetch();
        resource.wait().await;

        // give an un-aborted first request time to land if it were going to
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(resource.snapshot().data, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_drop_discards_late_response() {
        let (mut resource, _) = counting_resource(30, false);
        let handle = resource.handle();
        resource.fetch();
        drop(resource);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let state = handle.snapshot();
        assert_eq!(state.data, None);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_clear_and_clear_error() {
        let (mut resource, _) = counting_resource(0, true);
        resource.load().await;
        assert!(resource.snapshot().error.is_some());

        resource.clear_error();
        assert_eq!(resource.snapshot().error, None);

        resource.load().await;
        assert_eq!(resource.snapshot().data, Some(2));

        resource.clear();
        assert_eq!(resource.snapshot(), FetchState::default());
    }
}
