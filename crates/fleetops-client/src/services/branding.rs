//! Branding contract and assignment endpoints.

use fleetops_core::model::{
    AssignTrainRequest, BrandingAssignment, BrandingContract, ExposureLog, ExposureReport,
};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Client for `/api/branding`.
#[derive(Debug, Clone)]
pub struct BrandingService {
    client: ApiClient,
}

impl BrandingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn contracts(&self) -> Result<Vec<BrandingContract>, ApiError> {
        self.client.get("/api/branding/contracts").await
    }

    pub async fn contract_by_id(&self, id: &str) -> Result<BrandingContract, ApiError> {
        self.client
            .get(&format!("/api/branding/contracts/{id}"))
            .await
    }

    pub async fn active_contracts(&self) -> Result<Vec<BrandingContract>, ApiError> {
        self.client.get("/api/branding/contracts/active").await
    }

    /// Contracts at risk of missing their exposure SLA.
    pub async fn contracts_at_risk(&self) -> Result<Vec<BrandingContract>, ApiError> {
        self.client.get("/api/branding/contracts/at-risk").await
    }

    pub async fn create_contract(
        &self,
        contract: &BrandingContract,
    ) -> Result<BrandingContract, ApiError> {
        self.client.post("/api/branding/contracts", contract).await
    }

    pub async fn assignments(&self) -> Result<Vec<BrandingAssignment>, ApiError> {
        self.client.get("/api/branding/assignments").await
    }

    pub async fn assignments_by_train(
        &self,
        train_id: i64,
    ) -> Result<Vec<BrandingAssignment>, ApiError> {
        self.client
            .get(&format!("/api/branding/assignments/train/{train_id}"))
            .await
    }

    pub async fn assignments_by_contract(
        &self,
        contract_id: &str,
    ) -> Result<Vec<BrandingAssignment>, ApiError> {
        self.client
            .get(&format!("/api/branding/assignments/contract/{contract_id}"))
            .await
    }

    pub async fn create_assignment(
        &self,
        assignment: &BrandingAssignment,
    ) -> Result<BrandingAssignment, ApiError> {
        self.client
            .post("/api/branding/assignments", assignment)
            .await
    }

    /// Attach a train to a contract. The backend wants the train id as a
    /// string in this body, unlike everywhere else.
    pub async fn assign_train(
        &self,
        train_id: i64,
        contract_id: &str,
    ) -> Result<BrandingAssignment, ApiError> {
        let request = AssignTrainRequest {
            train_id: train_id.to_string(),
            contract_id: contract_id.to_string(),
        };
        self.client
            .post("/api/branding/assignments/assign-train", &request)
            .await
    }

    pub async fn log_exposure(&self, log: &ExposureLog) -> Result<ExposureLog, ApiError> {
        self.client.post("/api/branding/log-exposure", log).await
    }

    pub async fn exposure_report_by_contract(
        &self,
        contract_id: &str,
    ) -> Result<ExposureReport, ApiError> {
        self.client
            .get(&format!("/api/branding/exposure-report/contract/{contract_id}"))
            .await
    }

    pub async fn exposure_report_by_train(
        &self,
        train_id: i64,
    ) -> Result<ExposureReport, ApiError> {
        self.client
            .get(&format!("/api/branding/exposure-report/train/{train_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RetryPolicy;
    use std::time::Duration;

    fn service(url: &str) -> BrandingService {
        BrandingService::new(ApiClient::with_policy(
            url,
            RetryPolicy {
                retry_attempts: 0,
                retry_delay: Duration::ZERO,
            },
        ))
    }

    #[tokio::test]
    async fn test_assign_train_sends_string_train_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/branding/assignments/assign-train")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "trainId": "12",
                "contractId": "CT-7"
            })))
            .with_status(200)
            .with_body(r#"{"trainId": 12, "contractId": "CT-7", "active": true}"#)
            .create_async()
            .await;

        let assignment = service(&server.url()).assign_train(12, "CT-7").await.unwrap();
        assert_eq!(assignment.train_id, 12);
        assert!(assignment.active);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_contracts_decode_wire_branding_type() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/branding/contracts/active")
            .with_status(200)
            .with_body(
                r#"[{"status": "Yes", "contractId": "CT-7",
                     "contractStatus": "Active", "brandingType": "Full Wrap",
                     "advertiserName": "Kochi Brews"}]"#,
            )
            .create_async()
            .await;

        let contracts = service(&server.url()).active_contracts().await.unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(
            contracts[0].branding_type,
            Some(fleetops_core::model::BrandingType::FullWrap)
        );
    }
}
