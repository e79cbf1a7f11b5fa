//! Cleaning task entity.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ParseEnumError;

/// Depth of a cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CleaningType {
    DeepClean,
    Routine,
    QuickWash,
}

impl FromStr for CleaningType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "DEEP_CLEAN" => Ok(CleaningType::DeepClean),
            "ROUTINE" => Ok(CleaningType::Routine),
            "QUICK_WASH" => Ok(CleaningType::QuickWash),
            _ => Err(ParseEnumError::new("cleaning type", s)),
        }
    }
}

/// Progress state of a cleaning task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CleaningStatus {
    Pending,
    InProgress,
    Completed,
}

/// A scheduled or running cleaning slot in a washing bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningTask {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub train_id: Option<i64>,
    pub bay_id: String,
    pub cleaning_type: CleaningType,
    #[serde(default)]
    pub remarks: Option<String>,

    #[serde(default)]
    pub scheduled_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub scheduled_end: Option<NaiveDateTime>,
    #[serde(default)]
    pub actual_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub actual_end: Option<NaiveDateTime>,

    pub status: CleaningStatus,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
    /// Kept for older records that predate the schedule fields.
    #[serde(default)]
    pub last_cleaned: Option<NaiveDateTime>,

    #[serde(default)]
    pub assigned_team_id: Option<String>,
    #[serde(default)]
    pub supervisor_override: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaning_type_parse() {
        assert_eq!(
            "deep-clean".parse::<CleaningType>().unwrap(),
            CleaningType::DeepClean
        );
        assert!("SPOTLESS".parse::<CleaningType>().is_err());
    }

    #[test]
    fn test_task_deserializes_schedule_window() {
        let json = r#"{
            "taskId": "CL-42",
            "trainId": 4,
            "bayId": "BAY-2",
            "cleaningType": "QUICK_WASH",
            "scheduledStart": "2026-08-07T05:00:00",
            "scheduledEnd": "2026-08-07T05:45:00",
            "status": "PENDING"
        }"#;
        let task: CleaningTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.cleaning_type, CleaningType::QuickWash);
        assert_eq!(task.status, CleaningStatus::Pending);
        assert!(task.actual_start.is_none());
    }
}
