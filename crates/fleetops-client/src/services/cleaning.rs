//! Cleaning task endpoints.

use chrono::NaiveDate;
use fleetops_core::model::CleaningTask;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Client for `/api/cleaning`.
#[derive(Debug, Clone)]
pub struct CleaningService {
    client: ApiClient,
}

impl CleaningService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<CleaningTask>, ApiError> {
        self.client.get("/api/cleaning").await
    }

    pub async fn by_id(&self, task_id: &str) -> Result<CleaningTask, ApiError> {
        self.client.get(&format!("/api/cleaning/{task_id}")).await
    }

    pub async fn by_train(&self, train_id: i64) -> Result<Vec<CleaningTask>, ApiError> {
        self.client
            .get(&format!("/api/cleaning/train/{train_id}"))
            .await
    }

    pub async fn active(&self) -> Result<Vec<CleaningTask>, ApiError> {
        self.client.get("/api/cleaning/active").await
    }

    /// Tasks scheduled for one calendar day.
    pub async fn scheduled_for(&self, date: NaiveDate) -> Result<Vec<CleaningTask>, ApiError> {
        self.client
            .get(&format!("/api/cleaning/scheduled/{date}"))
            .await
    }

    pub async fn today(&self) -> Result<Vec<CleaningTask>, ApiError> {
        self.client.get("/api/cleaning/today").await
    }

    pub async fn due(&self) -> Result<Vec<CleaningTask>, ApiError> {
        self.client.get("/api/cleaning/due").await
    }

    /// Ask the backend to lay out today's cleaning schedule.
    pub async fn schedule_daily(&self) -> Result<Vec<CleaningTask>, ApiError> {
        self.client.post_empty("/api/cleaning/schedule-daily").await
    }

    pub async fn create(&self, task: &CleaningTask) -> Result<CleaningTask, ApiError> {
        self.client.post("/api/cleaning", task).await
    }

    pub async fn schedule_for_train(
        &self,
        train_id: i64,
        task: &CleaningTask,
    ) -> Result<CleaningTask, ApiError> {
        self.client
            .post(&format!("/api/cleaning/schedule-for-train/{train_id}"), task)
            .await
    }

    pub async fn update(&self, task_id: &str, task: &CleaningTask) -> Result<CleaningTask, ApiError> {
        self.client
            .put(&format!("/api/cleaning/{task_id}"), task)
            .await
    }

    pub async fn start(&self, task_id: &str) -> Result<CleaningTask, ApiError> {
        self.client
            .put_empty(&format!("/api/cleaning/{task_id}/start"))
            .await
    }

    pub async fn complete(&self, task_id: &str) -> Result<CleaningTask, ApiError> {
        self.client
            .put_empty(&format!("/api/cleaning/{task_id}/complete"))
            .await
    }

    pub async fn delete(&self, task_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/cleaning/{task_id}")).await
    }
}
