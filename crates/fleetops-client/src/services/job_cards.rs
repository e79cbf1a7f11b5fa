//! Job card endpoints.

use fleetops_core::model::{JobCard, JobCardStatus, JobCardUpdate};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Client for `/api/jobcards`.
#[derive(Debug, Clone)]
pub struct JobCardService {
    client: ApiClient,
}

impl JobCardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<JobCard>, ApiError> {
        self.client.get("/api/jobcards").await
    }

    pub async fn by_id(&self, id: &str) -> Result<JobCard, ApiError> {
        self.client.get(&format!("/api/jobcards/{id}")).await
    }

    pub async fn open(&self) -> Result<Vec<JobCard>, ApiError> {
        self.client.get("/api/jobcards/open").await
    }

    /// The backend has no `/completed` endpoint; fetch all and filter here.
    pub async fn completed(&self) -> Result<Vec<JobCard>, ApiError> {
        let all = self.all().await?;
        Ok(all
            .into_iter()
            .filter(|jc| jc.status == JobCardStatus::Completed)
            .collect())
    }

    pub async fn critical(&self) -> Result<Vec<JobCard>, ApiError> {
        self.client.get("/api/jobcards/critical").await
    }

    pub async fn overdue(&self) -> Result<Vec<JobCard>, ApiError> {
        self.client.get("/api/jobcards/overdue").await
    }

    pub async fn by_train(&self, train_id: i64) -> Result<Vec<JobCard>, ApiError> {
        self.client
            .get(&format!("/api/jobcards/train/{train_id}"))
            .await
    }

    pub async fn by_trainset(&self, trainset_id: i64) -> Result<Vec<JobCard>, ApiError> {
        self.client
            .get(&format!("/api/jobcards/trainset/{trainset_id}"))
            .await
    }

    pub async fn by_team(&self, team: &str) -> Result<Vec<JobCard>, ApiError> {
        self.client.get(&format!("/api/jobcards/team/{team}")).await
    }

    pub async fn create(&self, card: &JobCard) -> Result<JobCard, ApiError> {
        self.client.post("/api/jobcards", card).await
    }

    pub async fn update(&self, id: &str, update: &JobCardUpdate) -> Result<JobCard, ApiError> {
        self.client.put(&format!("/api/jobcards/{id}"), update).await
    }

    pub async fn start(&self, id: &str) -> Result<JobCard, ApiError> {
        self.client
            .put_empty(&format!("/api/jobcards/{id}/start"))
            .await
    }

    pub async fn complete(&self, id: &str) -> Result<JobCard, ApiError> {
        self.client
            .put_empty(&format!("/api/jobcards/{id}/complete"))
            .await
    }

    pub async fn close(&self, id: &str) -> Result<JobCard, ApiError> {
        self.client
            .put_empty(&format!("/api/jobcards/{id}/close"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RetryPolicy;
    use std::time::Duration;

    fn service(url: &str) -> JobCardService {
        JobCardService::new(ApiClient::with_policy(
            url,
            RetryPolicy {
                retry_attempts: 0,
                retry_delay: Duration::ZERO,
            },
        ))
    }

    const CARDS: &str = r#"[
        {"jobCardId": "JC-1", "trainId": 1, "assetComponent": "GENERAL",
         "workType": "CORRECTIVE", "priority": "HIGH", "status": "OPEN",
         "summary": "Brakes", "assignedTo": "Team-A"},
        {"jobCardId": "JC-2", "trainId": 1, "assetComponent": "GENERAL",
         "workType": "PREVENTIVE", "priority": "LOW", "status": "COMPLETED",
         "summary": "Wipers", "assignedTo": "Team-B"},
        {"jobCardId": "JC-3", "trainId": 2, "assetComponent": "GENERAL",
         "workType": "CORRECTIVE", "priority": "MEDIUM", "status": "CLOSED",
         "summary": "Doors", "assignedTo": "Team-A"}
    ]"#;

    #[tokio::test]
    async fn test_completed_filters_client_side() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/jobcards")
            .with_status(200)
            .with_body(CARDS)
            .expect(1)
            .create_async()
            .await;

        let completed = service(&server.url()).completed().await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].job_card_id, "JC-2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transition_endpoints_send_empty_put() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/jobcards/JC-1/start")
            .with_status(200)
            .with_body(
                r#"{"jobCardId": "JC-1", "trainId": 1, "assetComponent": "GENERAL",
                    "workType": "CORRECTIVE", "priority": "HIGH", "status": "IN_PROGRESS",
                    "summary": "Brakes", "assignedTo": "Team-A"}"#,
            )
            .create_async()
            .await;

        let card = service(&server.url()).start("JC-1").await.unwrap();
        assert_eq!(card.status, JobCardStatus::InProgress);
        mock.assert_async().await;
    }
}
