//! Job card (maintenance work order) entity.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ParseEnumError;

/// Workflow state of a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobCardStatus {
    Open,
    InProgress,
    Blocked,
    Completed,
    Closed,
}

impl fmt::Display for JobCardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobCardStatus::Open => "OPEN",
            JobCardStatus::InProgress => "IN_PROGRESS",
            JobCardStatus::Blocked => "BLOCKED",
            JobCardStatus::Completed => "COMPLETED",
            JobCardStatus::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}

/// Urgency of a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobCardPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for JobCardPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobCardPriority::Critical => "CRITICAL",
            JobCardPriority::High => "HIGH",
            JobCardPriority::Medium => "MEDIUM",
            JobCardPriority::Low => "LOW",
        };
        f.write_str(s)
    }
}

impl FromStr for JobCardPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(JobCardPriority::Critical),
            "HIGH" => Ok(JobCardPriority::High),
            "MEDIUM" => Ok(JobCardPriority::Medium),
            "LOW" => Ok(JobCardPriority::Low),
            _ => Err(ParseEnumError::new("job card priority", s)),
        }
    }
}

/// Kind of maintenance work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    Corrective,
    Preventive,
}

impl FromStr for WorkType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CORRECTIVE" => Ok(WorkType::Corrective),
            "PREVENTIVE" => Ok(WorkType::Preventive),
            _ => Err(ParseEnumError::new("work type", s)),
        }
    }
}

/// A maintenance ticket tied to a train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub job_card_id: String,
    pub train_id: i64,
    #[serde(default)]
    pub trainset_id: Option<i64>,
    pub asset_component: String,
    pub work_type: WorkType,
    pub priority: JobCardPriority,
    pub status: JobCardStatus,
    #[serde(default)]
    pub reported_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub target_completion_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub actual_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub actual_end: Option<NaiveDateTime>,
    pub summary: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub labor_hours_logged: f64,
    pub assigned_to: String,
    #[serde(default)]
    pub supervisor_override: bool,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
}

impl JobCard {
    /// Outstanding means not yet COMPLETED (CLOSED cards still count).
    pub fn is_outstanding(&self) -> bool {
        self.status != JobCardStatus::Completed
    }
}

/// Partial update for `PUT /api/jobcards/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobCardStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<JobCardPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_hours_logged: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_completion_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_override: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(status: JobCardStatus) -> JobCard {
        JobCard {
            job_card_id: "JC-1".to_string(),
            train_id: 1,
            trainset_id: None,
            asset_component: "GENERAL".to_string(),
            work_type: WorkType::Corrective,
            priority: JobCardPriority::Medium,
            status,
            reported_date: None,
            target_completion_date: None,
            actual_start: None,
            actual_end: None,
            summary: "Brake inspection".to_string(),
            details: String::new(),
            labor_hours_logged: 0.0,
            assigned_to: "Team-A".to_string(),
            supervisor_override: false,
            last_updated: None,
        }
    }

    #[test]
    fn test_outstanding_excludes_only_completed() {
        assert!(card(JobCardStatus::Open).is_outstanding());
        assert!(card(JobCardStatus::InProgress).is_outstanding());
        assert!(card(JobCardStatus::Blocked).is_outstanding());
        assert!(card(JobCardStatus::Closed).is_outstanding());
        assert!(!card(JobCardStatus::Completed).is_outstanding());
    }

    #[test]
    fn test_deserializes_backend_entity_shape() {
        let json = r#"{
            "jobCardId": "JC-1738000000",
            "trainId": 3,
            "trainsetId": null,
            "assetComponent": "GENERAL",
            "workType": "PREVENTIVE",
            "priority": "HIGH",
            "status": "IN_PROGRESS",
            "reportedDate": "2026-07-01T09:30:00",
            "targetCompletionDate": "2026-07-08T17:00:00",
            "actualStart": "2026-07-02T08:00:00",
            "actualEnd": null,
            "summary": "Bogie overhaul",
            "details": "Scheduled preventive overhaul",
            "laborHoursLogged": 12.5,
            "assignedTo": "Team-B",
            "supervisorOverride": false,
            "lastUpdated": "2026-07-02T08:00:00"
        }"#;
        let jc: JobCard = serde_json::from_str(json).unwrap();
        assert_eq!(jc.priority, JobCardPriority::High);
        assert_eq!(jc.status, JobCardStatus::InProgress);
        assert!(jc.is_outstanding());
    }
}
