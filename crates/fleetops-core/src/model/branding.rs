//! Branding (advertising) contracts, assignments and exposure records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Whether a train currently carries branding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrandingFlag {
    Yes,
    No,
}

/// Lifecycle of a branding contract. Title case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Expired,
    Pending,
}

/// Physical placement of the creative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrandingType {
    #[serde(rename = "Full Wrap")]
    FullWrap,
    #[serde(rename = "Partial Wrap")]
    PartialWrap,
    Interior,
}

/// An advertising placement agreement with exposure SLA terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingContract {
    pub status: BrandingFlag,

    // Contract info
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub contract_value: Option<f64>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub contract_status: Option<ContractStatus>,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,

    // Branding info
    #[serde(default)]
    pub advertiser_name: Option<String>,
    #[serde(default)]
    pub branding_type: Option<BrandingType>,
    #[serde(default)]
    pub branding_description: Option<String>,
    #[serde(default)]
    pub creative_content: Option<String>,
    #[serde(default)]
    pub placement_instructions: Option<String>,

    // Performance & SLA
    #[serde(default)]
    pub required_hours: Option<f64>,
    #[serde(default)]
    pub minimum_daily_hours: Option<f64>,
    #[serde(default)]
    pub minimum_weekly_hours: Option<f64>,
    #[serde(default)]
    pub sla_requirements: Option<String>,

    // Penalty & compliance
    #[serde(default)]
    pub penalty_terms: Option<String>,
    #[serde(default)]
    pub penalty_percentage: Option<f64>,

    // Contact info
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// Ties a contract to one train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingAssignment {
    #[serde(default)]
    pub assignment_id: Option<String>,
    pub train_id: i64,
    pub contract_id: String,
    #[serde(default)]
    pub assigned_date: Option<NaiveDate>,
    #[serde(default)]
    pub active: bool,
}

/// Body for `POST /api/branding/assignments/assign-train`.
///
/// The backend expects the train id as a string here, unlike everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTrainRequest {
    pub train_id: String,
    pub contract_id: String,
}

/// One logged exposure interval, `POST /api/branding/log-exposure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureLog {
    pub contract_id: String,
    pub train_id: i64,
    #[serde(default)]
    pub exposure_date: Option<NaiveDate>,
    pub hours_logged: f64,
}

/// Aggregated exposure report for a contract or a train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureReport {
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub train_id: Option<i64>,
    #[serde(default)]
    pub total_hours_logged: f64,
    #[serde(default)]
    pub required_hours: Option<f64>,
    #[serde(default)]
    pub compliance_percentage: Option<f64>,
    #[serde(default)]
    pub entries: Vec<ExposureLog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branding_type_wire_names_have_spaces() {
        assert_eq!(
            serde_json::to_string(&BrandingType::FullWrap).unwrap(),
            "\"Full Wrap\""
        );
        let t: BrandingType = serde_json::from_str("\"Partial Wrap\"").unwrap();
        assert_eq!(t, BrandingType::PartialWrap);
    }

    #[test]
    fn test_minimal_contract_deserializes() {
        let contract: BrandingContract =
            serde_json::from_str(r#"{"status": "No"}"#).unwrap();
        assert_eq!(contract.status, BrandingFlag::No);
        assert!(contract.contract_id.is_none());
    }
}
