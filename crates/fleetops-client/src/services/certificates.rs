//! Fitness certificate endpoints.
//!
//! The listing endpoints here are the ones that wrap their payload in the
//! `{ value, Count }` envelope; each is unwrapped explicitly and `Count` is
//! discarded.

use fleetops_core::model::{
    Certificate, CertificateUpdate, ListEnvelope, TrainCertificateStatus,
};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Client for `/api/certificates`.
#[derive(Debug, Clone)]
pub struct CertificateService {
    client: ApiClient,
}

impl CertificateService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Certificate>, ApiError> {
        let envelope: ListEnvelope<Certificate> = self.client.get("/api/certificates").await?;
        Ok(envelope.into_inner())
    }

    pub async fn by_id(&self, id: &str) -> Result<Certificate, ApiError> {
        self.client.get(&format!("/api/certificates/{id}")).await
    }

    pub async fn by_train(&self, train_id: i64) -> Result<Vec<Certificate>, ApiError> {
        self.client
            .get(&format!("/api/certificates/train/{train_id}"))
            .await
    }

    pub async fn expired(&self) -> Result<Vec<Certificate>, ApiError> {
        let envelope: ListEnvelope<Certificate> =
            self.client.get("/api/certificates/expired").await?;
        Ok(envelope.into_inner())
    }

    pub async fn expiring_soon(&self) -> Result<Vec<Certificate>, ApiError> {
        let envelope: ListEnvelope<Certificate> =
            self.client.get("/api/certificates/expiring-soon").await?;
        Ok(envelope.into_inner())
    }

    /// Whether the train holds a currently valid certificate.
    pub async fn valid_for_train(&self, train_id: i64) -> Result<bool, ApiError> {
        self.client
            .get(&format!("/api/certificates/train/{train_id}/valid"))
            .await
    }

    pub async fn status_for_train(
        &self,
        train_id: i64,
    ) -> Result<TrainCertificateStatus, ApiError> {
        self.client
            .get(&format!("/api/certificates/train/{train_id}/status"))
            .await
    }

    pub async fn create(&self, certificate: &Certificate) -> Result<Certificate, ApiError> {
        self.client.post("/api/certificates", certificate).await
    }

    pub async fn update(
        &self,
        id: &str,
        update: &CertificateUpdate,
    ) -> Result<Certificate, ApiError> {
        self.client
            .put(&format!("/api/certificates/{id}"), update)
            .await
    }

    pub async fn revoke(&self, id: &str) -> Result<Certificate, ApiError> {
        self.client
            .put_empty(&format!("/api/certificates/{id}/revoke"))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/certificates/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RetryPolicy;
    use std::time::Duration;

    fn service(url: &str) -> CertificateService {
        CertificateService::new(ApiClient::with_policy(
            url,
            RetryPolicy {
                retry_attempts: 0,
                retry_delay: Duration::ZERO,
            },
        ))
    }

    #[tokio::test]
    async fn test_listing_unwraps_envelope_and_discards_count() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/certificates")
            .with_status(200)
            .with_body(
                r#"{"value": [
                    {"certificateId": "FC-1", "certificateNumber": "2026/001",
                     "status": "ACTIVE", "department": "ROLLING_STOCK",
                     "issuedBy": "RS Inspectorate", "approvedBy": "Chief Engineer"},
                    {"certificateId": "FC-2", "certificateNumber": "2026/002",
                     "status": "VALID", "department": "SIGNALING",
                     "issuedBy": "Signal Cell", "approvedBy": "Chief Engineer"},
                    {"certificateId": "FC-3", "certificateNumber": "2025/118",
                     "status": "EXPIRED", "department": "OPERATIONS",
                     "issuedBy": "Ops Cell", "approvedBy": "Chief Engineer"}
                ], "Count": 3}"#,
            )
            .create_async()
            .await;

        let certificates = service(&server.url()).all().await.unwrap();
        assert_eq!(certificates.len(), 3);
        // The VALID spelling maps onto Active.
        assert!(certificates[1].is_active());
    }

    #[tokio::test]
    async fn test_validity_check_returns_bare_bool() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/certificates/train/3/valid")
            .with_status(200)
            .with_body("true")
            .create_async()
            .await;

        assert!(service(&server.url()).valid_for_train(3).await.unwrap());
    }
}
