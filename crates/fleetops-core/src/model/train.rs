//! Train entity and its per-train status records.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{BrandingAssignment, Certificate, CleaningTask, JobCard};
use crate::ParseEnumError;

/// Lifecycle status of a trainset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainStatus {
    InService,
    Maintenance,
    Active,
    Retired,
}

impl TrainStatus {
    /// IN_SERVICE and ACTIVE both count as operational for fleet metrics.
    pub fn is_operational(self) -> bool {
        matches!(self, TrainStatus::InService | TrainStatus::Active)
    }

    /// Wire form, as the backend spells it in JSON and query params.
    pub fn as_str(self) -> &'static str {
        match self {
            TrainStatus::InService => "IN_SERVICE",
            TrainStatus::Maintenance => "MAINTENANCE",
            TrainStatus::Active => "ACTIVE",
            TrainStatus::Retired => "RETIRED",
        }
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "IN_SERVICE" => Ok(TrainStatus::InService),
            "MAINTENANCE" => Ok(TrainStatus::Maintenance),
            "ACTIVE" => Ok(TrainStatus::Active),
            "RETIRED" => Ok(TrainStatus::Retired),
            _ => Err(ParseEnumError::new("train status", s)),
        }
    }
}

/// One completed service run, embedded in a train's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripHistory {
    pub trip_id: i64,
    #[serde(default)]
    pub trip_date: Option<NaiveDate>,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub route: Option<String>,
}

/// A trainset as the backend returns it.
///
/// The embedded arrays are denormalized copies; the authoritative records
/// live behind their own endpoints. Absent arrays deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    pub train_id: i64,
    pub train_number: String,
    #[serde(default)]
    pub commissioning_date: Option<NaiveDate>,

    pub status: TrainStatus,
    #[serde(default)]
    pub depot_location: Option<String>,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,

    #[serde(default)]
    pub current_odometer: f64,
    #[serde(default)]
    pub last_maintenance_date: Option<NaiveDate>,
    #[serde(default)]
    pub odometer_at_last_maintenance: f64,
    #[serde(default)]
    pub maintenance_interval: f64,

    #[serde(default)]
    pub last_cleaning_date_time: Option<NaiveDateTime>,
    /// Cleaning cadence in days.
    #[serde(default)]
    pub cleaning_period: i64,
    #[serde(default)]
    pub daily_max_mileage: f64,

    #[serde(default)]
    pub job_cards: Vec<JobCard>,
    #[serde(default)]
    pub fitness_certificates: Vec<Certificate>,
    #[serde(default)]
    pub branding_assignments: Vec<BrandingAssignment>,
    #[serde(default)]
    pub cleaning_tasks: Vec<CleaningTask>,
    #[serde(default)]
    pub trip_histories: Vec<TripHistory>,
}

impl Train {
    /// Whether any embedded fitness certificate is currently ACTIVE.
    pub fn has_active_certificate(&self) -> bool {
        self.fitness_certificates.iter().any(Certificate::is_active)
    }

    /// Count of embedded job cards that are still outstanding.
    pub fn outstanding_job_cards(&self) -> usize {
        self.job_cards.iter().filter(|j| j.is_outstanding()).count()
    }
}

/// Partial update for `PUT /api/trains/{id}`.
///
/// Only the present fields are serialized; the depot drag-move writes
/// `depot_location` and `status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TrainStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_odometer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_maintenance_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_interval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_max_mileage: Option<f64>,
}

/// `GET /api/trains/{id}/maintenance-due`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDue {
    pub train_id: i64,
    pub due: bool,
    #[serde(default)]
    pub km_since_last_maintenance: Option<f64>,
    #[serde(default)]
    pub km_until_due: Option<f64>,
}

/// `GET /api/trains/{id}/cleaning-due`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningDue {
    pub train_id: i64,
    pub due: bool,
    #[serde(default)]
    pub days_since_last_cleaning: Option<i64>,
    #[serde(default)]
    pub days_until_due: Option<i64>,
}

/// `GET /api/trains/{id}/mileage-balance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageBalance {
    pub train_id: i64,
    #[serde(default)]
    pub current_odometer: f64,
    #[serde(default)]
    pub daily_max_mileage: f64,
    #[serde(default)]
    pub remaining_today: Option<f64>,
}

/// `GET /api/trains/{id}/validate-for-service`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceValidation {
    pub train_id: i64,
    pub fit_for_service: bool,
    #[serde(default)]
    pub blockers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_form_round_trips() {
        let json = serde_json::to_string(&TrainStatus::InService).unwrap();
        assert_eq!(json, "\"IN_SERVICE\"");
        let back: TrainStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TrainStatus::InService);
    }

    #[test]
    fn test_status_from_str_accepts_cli_spellings() {
        assert_eq!("in-service".parse::<TrainStatus>().unwrap(), TrainStatus::InService);
        assert_eq!("MAINTENANCE".parse::<TrainStatus>().unwrap(), TrainStatus::Maintenance);
        assert!("PARKED".parse::<TrainStatus>().is_err());
    }

    #[test]
    fn test_train_deserializes_with_absent_arrays() {
        let json = r#"{
            "trainId": 7,
            "trainNumber": "KM-07",
            "status": "ACTIVE",
            "depotLocation": "Muttom Depot",
            "currentOdometer": 120534.5,
            "odometerAtLastMaintenance": 118000.0,
            "maintenanceInterval": 5000.0,
            "cleaningPeriod": 3,
            "dailyMaxMileage": 450.0
        }"#;
        let train: Train = serde_json::from_str(json).unwrap();
        assert_eq!(train.train_id, 7);
        assert_eq!(train.status, TrainStatus::Active);
        assert!(train.job_cards.is_empty());
        assert!(train.fitness_certificates.is_empty());
        assert!(!train.has_active_certificate());
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let update = TrainUpdate {
            depot_location: Some("ML1".to_string()),
            status: Some(TrainStatus::Maintenance),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"depotLocation": "ML1", "status": "MAINTENANCE"})
        );
    }
}
