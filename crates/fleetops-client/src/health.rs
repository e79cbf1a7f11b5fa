//! Backend health gate.
//!
//! Defers dependent fetches until the backend has answered successfully at
//! least once. The probe hits the trains listing (cheap, always present) with
//! a single-attempt client; the poll loop, not the retry loop, owns re-probe
//! cadence. Concurrent checks while a probe is outstanding share one
//! underlying request.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::{Mutex, RwLock};
use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{ApiClient, RetryPolicy};

/// Endpoint probed for liveness.
pub const PROBE_PATH: &str = "/api/trains";

/// Delay between polls in [`HealthGate::wait_until_ready`].
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// No probe has completed since the last reset.
    Checking,
    Healthy,
    Unhealthy,
}

/// Last observed backend health.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendHealth {
    pub status: HealthStatus,
    pub message: String,
    pub last_checked: Option<DateTime<Utc>>,
}

impl BackendHealth {
    fn checking() -> Self {
        Self {
            status: HealthStatus::Checking,
            message: "checking backend connectivity".to_string(),
            last_checked: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

type ProbeFuture = Shared<BoxFuture<'static, BackendHealth>>;

/// Gate dependent fetches on backend reachability.
///
/// An explicit value handed to consumers, not process state; construct one
/// per backend and share it.
pub struct HealthGate {
    client: ApiClient,
    status: RwLock<BackendHealth>,
    in_flight: Mutex<Option<ProbeFuture>>,
    poll_interval: Duration,
}

impl HealthGate {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(ApiClient::with_policy(
            config.base_url.clone(),
            RetryPolicy::NONE,
        ))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            client,
            status: RwLock::new(BackendHealth::checking()),
            in_flight: Mutex::new(None),
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Override the poll cadence (tests use millisecond polls).
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Probe the backend once, coalescing with any probe already in flight.
    pub async fn check(&self) -> BackendHealth {
        let probe = {
            let mut slot = self.in_flight.lock();
            match slot.as_ref() {
                Some(probe) => probe.clone(),
                None => {
                    let client = self.client.clone();
                    let probe = async move { Self::probe(client).await }.boxed().shared();
                    *slot = Some(probe.clone());
                    probe
                }
            }
        };

        let health = probe.clone().await;

        // Free the slot so the next check re-probes, but only if a newer
        // probe has not replaced ours in the meantime.
        {
            let mut slot = self.in_flight.lock();
            if slot.as_ref().is_some_and(|p| p.ptr_eq(&probe)) {
                *slot = None;
            }
        }
        *self.status.write() = health.clone();
        health
    }

    async fn probe(client: ApiClient) -> BackendHealth {
        match client.perform(Method::GET, PROBE_PATH, None).await {
            Ok(_) => BackendHealth {
                status: HealthStatus::Healthy,
                message: "backend is ready".to_string(),
                last_checked: Some(Utc::now()),
            },
            Err(err) => BackendHealth {
                status: HealthStatus::Unhealthy,
                message: format!("backend not ready: {err}"),
                last_checked: Some(Utc::now()),
            },
        }
    }

    /// Poll until healthy or `timeout` has elapsed since waiting began.
    ///
    /// The timeout is cooperative: a hung probe is not aborted, it just stops
    /// being awaited once the window closes.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<BackendHealth, ApiError> {
        let start = tokio::time::Instant::now();
        while start.elapsed() < timeout {
            let health = self.check().await;
            if health.is_healthy() {
                tracing::info!(waited = ?start.elapsed(), "backend ready");
                return Ok(health);
            }
            tracing::debug!(message = %health.message, "backend not ready yet");
            tokio::time::sleep(self.poll_interval).await;
        }
        tracing::warn!(timeout = ?timeout, "gave up waiting for backend");
        Err(ApiError::HealthTimeout(timeout))
    }

    /// Last observed health without probing.
    pub fn current(&self) -> BackendHealth {
        self.status.read().clone()
    }

    /// Drop the cached status and any in-flight probe; the next check
    /// re-probes from scratch.
    pub fn reset(&self) {
        *self.status.write() = BackendHealth::checking();
        *self.in_flight.lock() = None;
    }
}
