//! Fitness certificate entity.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Compliance state of a certificate.
///
/// Some backend responses spell ACTIVE as VALID; both map to [`Self::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    #[serde(alias = "VALID")]
    Active,
    Expired,
    Pending,
    Revoked,
}

/// Issuing department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    RollingStock,
    Signaling,
    Operations,
}

/// A regulatory fitness certificate with a validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub certificate_id: String,
    pub certificate_number: String,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    pub status: CertificateStatus,
    #[serde(default)]
    pub is_renewal: bool,
    #[serde(default)]
    pub previous_certificate_id: Option<String>,

    pub department: Department,
    pub issued_by: String,
    pub approved_by: String,

    #[serde(default)]
    pub last_inspection_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_inspection_due: Option<NaiveDate>,
    #[serde(default)]
    pub inspection_details: Option<String>,
    #[serde(default)]
    pub compliance_notes: Option<String>,

    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
}

impl Certificate {
    pub fn is_active(&self) -> bool {
        self.status == CertificateStatus::Active
    }

    /// Expired strictly before the given date (expiry day itself still valid).
    pub fn is_expired_at(&self, date: NaiveDate) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry < date,
            None => false,
        }
    }
}

/// Partial update for `PUT /api/certificates/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CertificateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_inspection_due: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// `GET /api/certificates/train/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainCertificateStatus {
    pub train_id: i64,
    pub valid: bool,
    #[serde(default)]
    pub active_certificates: u32,
    #[serde(default)]
    pub expiring_soon: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_alias_maps_to_active() {
        let status: CertificateStatus = serde_json::from_str("\"VALID\"").unwrap();
        assert_eq!(status, CertificateStatus::Active);
        let status: CertificateStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, CertificateStatus::Active);
    }

    #[test]
    fn test_expiry_boundary() {
        let cert = Certificate {
            certificate_id: "FC-1".to_string(),
            certificate_number: "2026/001".to_string(),
            issue_date: None,
            expiry_date: Some(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()),
            status: CertificateStatus::Active,
            is_renewal: false,
            previous_certificate_id: None,
            department: Department::RollingStock,
            issued_by: "RS Inspectorate".to_string(),
            approved_by: "Chief Engineer".to_string(),
            last_inspection_date: None,
            next_inspection_due: None,
            inspection_details: None,
            compliance_notes: None,
            remarks: None,
            last_updated: None,
        };
        assert!(!cert.is_expired_at(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()));
        assert!(cert.is_expired_at(NaiveDate::from_ymd_opt(2026, 8, 2).unwrap()));
    }
}
