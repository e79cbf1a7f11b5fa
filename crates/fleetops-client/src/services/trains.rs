//! Train endpoints.

use fleetops_core::model::{
    CleaningDue, MaintenanceDue, MileageBalance, ServiceValidation, Train, TrainStatus,
    TrainUpdate,
};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Client for `/api/trains`.
#[derive(Debug, Clone)]
pub struct TrainService {
    client: ApiClient,
}

impl TrainService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Train>, ApiError> {
        self.client.get("/api/trains").await
    }

    pub async fn by_id(&self, id: i64) -> Result<Train, ApiError> {
        self.client.get(&format!("/api/trains/{id}")).await
    }

    pub async fn by_number(&self, number: &str) -> Result<Train, ApiError> {
        self.client.get(&format!("/api/trains/number/{number}")).await
    }

    pub async fn available(&self) -> Result<Vec<Train>, ApiError> {
        self.client.get("/api/trains/available").await
    }

    pub async fn in_maintenance(&self) -> Result<Vec<Train>, ApiError> {
        self.client.get("/api/trains/maintenance").await
    }

    pub async fn create(&self, train: &Train) -> Result<Train, ApiError> {
        self.client.post("/api/trains", train).await
    }

    pub async fn update(&self, id: i64, update: &TrainUpdate) -> Result<Train, ApiError> {
        self.client.put(&format!("/api/trains/{id}"), update).await
    }

    /// Status-only transition; the backend takes it as a query parameter.
    pub async fn update_status(&self, id: i64, status: TrainStatus) -> Result<Train, ApiError> {
        self.client
            .put_empty(&format!("/api/trains/updateStatus/{id}?status={status}"))
            .await
    }

    pub async fn maintenance_due(&self, id: i64) -> Result<MaintenanceDue, ApiError> {
        self.client
            .get(&format!("/api/trains/{id}/maintenance-due"))
            .await
    }

    pub async fn cleaning_due(&self, id: i64) -> Result<CleaningDue, ApiError> {
        self.client
            .get(&format!("/api/trains/{id}/cleaning-due"))
            .await
    }

    pub async fn validate_for_service(&self, id: i64) -> Result<ServiceValidation, ApiError> {
        self.client
            .get(&format!("/api/trains/{id}/validate-for-service"))
            .await
    }

    pub async fn mileage_balance(&self, id: i64) -> Result<MileageBalance, ApiError> {
        self.client
            .get(&format!("/api/trains/{id}/mileage-balance"))
            .await
    }
}
