//! # fleetops-client
//!
//! Resilient async access to the fleet-management backend.
//!
//! Layers, bottom up:
//! - [`http::ApiClient`] — one JSON call per attempt, classified errors,
//!   bounded linear-backoff retries
//! - [`health::HealthGate`] — blocks dependent fetches until the backend has
//!   answered successfully at least once
//! - [`fetch::GatedFetcher`] — the `{data, loading, error, retry}` contract
//!   consumer surfaces bind to
//! - [`services`] — one typed endpoint map per backend resource
//!
//! ## Example
//!
//! ```rust,ignore
//! use fleetops_client::{ClientConfig, FleetClient};
//!
//! let config = ClientConfig::from_env()?;
//! let fleet = FleetClient::new(&config);
//!
//! fleet.health.wait_until_ready(config.backend_timeout).await?;
//! let trains = fleet.trains.all().await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod health;
pub mod http;
pub mod services;

// Re-export main types at crate root
pub use cache::ResponseCache;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use fetch::{FetchOptions, FetchSnapshot, GatedFetcher};
pub use health::{BackendHealth, HealthGate, HealthStatus};
pub use http::{ApiClient, RetryPolicy};
pub use services::{
    BrandingService, CertificateService, CleaningService, DashboardService, JobCardService,
    TrainService,
};

use std::sync::Arc;

/// Everything needed to talk to one backend, wired together.
pub struct FleetClient {
    pub trains: TrainService,
    pub job_cards: JobCardService,
    pub certificates: CertificateService,
    pub branding: BrandingService,
    pub cleaning: CleaningService,
    pub dashboard: DashboardService,
    pub health: Arc<HealthGate>,
    pub cache: ResponseCache,
}

impl FleetClient {
    pub fn new(config: &ClientConfig) -> Self {
        let client = ApiClient::new(config);
        Self {
            trains: TrainService::new(client.clone()),
            job_cards: JobCardService::new(client.clone()),
            certificates: CertificateService::new(client.clone()),
            branding: BrandingService::new(client.clone()),
            cleaning: CleaningService::new(client.clone()),
            dashboard: DashboardService::new(client),
            health: Arc::new(HealthGate::new(config)),
            cache: ResponseCache::with_ttl(config.cache_ttl),
        }
    }

    /// Convenience constructor from environment configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&ClientConfig::from_env()?))
    }
}
