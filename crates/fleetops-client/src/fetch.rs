//! Health-gated fetch composition.
//!
//! The reusable contract the dashboard surfaces consume: check backend health
//! first, fail fast with an explanatory error when unhealthy, otherwise run
//! the fetch and expose `{data, loading, error, is_retrying}` plus `load` /
//! `retry`.
//!
//! The retrying client underneath is the transport retry authority, so the
//! fetcher's own automatic re-fetch defaults off; enable `retry_on_error`
//! only when composing raw one-shot fetch functions. Overlapping runs are not
//! cancelled — the later completion wins, which is acceptable for single-user
//! dashboards.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::RwLock;

use crate::error::ApiError;
use crate::health::HealthGate;

/// Options for [`GatedFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Automatically re-run on retryable errors. Off by default: the client
    /// underneath already retries transport failures.
    pub retry_on_error: bool,
    /// Re-run i (0-based) waits `retry_delay * (i + 1)`.
    pub retry_delay: Duration,
    pub max_retries: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            retry_on_error: false,
            retry_delay: Duration::from_secs(3),
            max_retries: 3,
        }
    }
}

/// Observable state of a fetcher at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_retrying: bool,
}

impl<T> Default for FetchSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            is_retrying: false,
        }
    }
}

struct FetchState<T> {
    snapshot: FetchSnapshot<T>,
    retry_count: u32,
}

type FetchFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// One gated fetch slot.
pub struct GatedFetcher<T> {
    gate: Arc<HealthGate>,
    fetch: FetchFn<T>,
    options: FetchOptions,
    state: RwLock<FetchState<T>>,
}

impl<T: Clone + Send + Sync + 'static> GatedFetcher<T> {
    pub fn new<F>(gate: Arc<HealthGate>, options: FetchOptions, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static,
    {
        Self {
            gate,
            fetch: Box::new(fetch),
            options,
            state: RwLock::new(FetchState {
                snapshot: FetchSnapshot::default(),
                retry_count: 0,
            }),
        }
    }

    /// Current state without triggering work.
    pub fn snapshot(&self) -> FetchSnapshot<T> {
        self.state.read().snapshot.clone()
    }

    /// Run the gate-then-fetch sequence.
    pub async fn load(&self) -> FetchSnapshot<T> {
        self.run().await
    }

    /// Reset the retry counter and re-run the whole sequence.
    pub async fn retry(&self) -> FetchSnapshot<T> {
        self.state.write().retry_count = 0;
        self.run().await
    }

    async fn run(&self) -> FetchSnapshot<T> {
        {
            let mut state = self.state.write();
            state.snapshot.loading = true;
            state.snapshot.error = None;
        }

        let outcome = loop {
            let health = self.gate.check().await;
            let result = if health.is_healthy() {
                (self.fetch)().await
            } else {
                Err(ApiError::BackendUnavailable(health.message.clone()))
            };

            match result {
                Ok(data) => break Ok(data),
                Err(err) => {
                    let retry_count = self.state.read().retry_count;
                    let retry = self.options.retry_on_error
                        && retry_count < self.options.max_retries
                        && err.is_retryable();
                    if !retry {
                        break Err(err);
                    }
                    let wait = self.options.retry_delay * (retry_count + 1);
                    tracing::warn!(
                        attempt = retry_count + 1,
                        max_retries = self.options.max_retries,
                        delay = ?wait,
                        error = %err,
                        "fetch failed, retrying"
                    );
                    {
                        let mut state = self.state.write();
                        state.retry_count = retry_count + 1;
                        state.snapshot.is_retrying = true;
                        state.snapshot.error = Some(err.to_string());
                    }
                    tokio::time::sleep(wait).await;
                }
            }
        };

        let mut state = self.state.write();
        state.snapshot.loading = false;
        state.snapshot.is_retrying = false;
        match outcome {
            Ok(data) => {
                state.snapshot.data = Some(data);
                state.snapshot.error = None;
                state.retry_count = 0;
            }
            Err(err) => {
                state.snapshot.error = Some(err.to_string());
            }
        }
        state.snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ApiClient, RetryPolicy};
    use futures::FutureExt;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn healthy_gate() -> (mockito::ServerGuard, Arc<HealthGate>) {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/trains")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let gate = Arc::new(HealthGate::with_client(ApiClient::with_policy(
            server.url(),
            RetryPolicy::NONE,
        )));
        (server, gate)
    }

    #[tokio::test]
    async fn test_healthy_gate_runs_fetch_once() {
        let (_server, gate) = healthy_gate().await;
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let fetcher = GatedFetcher::new(gate, FetchOptions::default(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(Ok(vec![1u32, 2, 3])).boxed()
        });

        let snapshot = fetcher.load().await;
        assert_eq!(snapshot.data, Some(vec![1, 2, 3]));
        assert!(snapshot.error.is_none());
        assert!(!snapshot.loading);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unhealthy_gate_fails_fast_without_fetching() {
        // Nothing listens on port 1, so every probe fails.
        let gate = Arc::new(HealthGate::with_client(ApiClient::with_policy(
            "http://127.0.0.1:1",
            RetryPolicy::NONE,
        )));
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let fetcher: GatedFetcher<Vec<u32>> =
            GatedFetcher::new(gate, FetchOptions::default(), move || {
                counter.fetch_add(1, Ordering::SeqCst);
                futures::future::ready(Ok(vec![])).boxed()
            });

        let snapshot = fetcher.load().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let error = snapshot.error.unwrap();
        assert!(error.contains("backend not ready"), "got: {error}");
    }

    #[tokio::test]
    async fn test_auto_retry_reruns_retryable_failures() {
        let (_server, gate) = healthy_gate().await;
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let options = FetchOptions {
            retry_on_error: true,
            retry_delay: Duration::from_millis(1),
            max_retries: 3,
        };
        let fetcher = GatedFetcher::new(gate, options, move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(ApiError::Http {
                        status: 502,
                        message: "bad gateway".to_string(),
                    })
                } else {
                    Ok("ok".to_string())
                }
            }
            .boxed()
        });

        let snapshot = fetcher.load().await;
        assert_eq!(snapshot.data.as_deref(), Some("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(!snapshot.is_retrying);
    }

    #[tokio::test]
    async fn test_auto_retry_never_touches_non_retryable_failures() {
        let (_server, gate) = healthy_gate().await;
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let options = FetchOptions {
            retry_on_error: true,
            retry_delay: Duration::from_millis(1),
            max_retries: 3,
        };
        let fetcher: GatedFetcher<String> = GatedFetcher::new(gate, options, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(Err(ApiError::Http {
                status: 404,
                message: "not found".to_string(),
            }))
            .boxed()
        });

        let snapshot = fetcher.load().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(snapshot.error.unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_retry_resets_counter_and_recovers() {
        let (_server, gate) = healthy_gate().await;
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let fetcher = GatedFetcher::new(gate, FetchOptions::default(), move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(ApiError::Network("connection reset".to_string()))
                } else {
                    Ok(42u32)
                }
            }
            .boxed()
        });

        let first = fetcher.load().await;
        assert!(first.error.is_some());
        assert!(first.data.is_none());

        let second = fetcher.retry().await;
        assert_eq!(second.data, Some(42));
        assert!(second.error.is_none());
    }
}
