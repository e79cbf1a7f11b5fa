//! Induction ranking profiles.
//!
//! Flattens each train's embedded state into the record the nightly
//! induction-ranking process consumes. Fully deterministic: scores derive
//! from status and outstanding work, never from random draws, and the
//! last-cleaning fallback takes an explicit reference date.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Train;

/// Certificate readiness, collapsed to what ranking cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateFitness {
    Valid,
    Expired,
}

/// Job-card readiness, collapsed to what ranking cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadFitness {
    Open,
    Completed,
}

/// Ranking input for one train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InductionProfile {
    pub train_id: String,
    pub fitness_certificate_status: CertificateFitness,
    pub job_card_status: WorkloadFitness,
    /// 1..=10; scales with active branding commitments.
    pub branding_priority: u8,
    pub mileage: f64,
    pub last_cleaning_date: NaiveDate,
    pub stabling_constraints: String,
    /// 50..=100; degrades with outstanding work.
    pub reliability_score: u8,
}

impl InductionProfile {
    /// Build a profile from a train's embedded records.
    ///
    /// `reference_date` anchors the 7-day fallback for trains that have never
    /// been cleaned.
    pub fn from_train(train: &Train, reference_date: NaiveDate) -> Self {
        let outstanding = train.outstanding_job_cards();

        let branding_priority = match train.branding_assignments.len() {
            0 => 1,
            n => n.min(10) as u8,
        };

        let base: i64 = if train.status.is_operational() { 95 } else { 78 };
        let reliability_score = (base - 3 * outstanding as i64).clamp(50, 100) as u8;

        let last_cleaning_date = train
            .last_cleaning_date_time
            .map(|dt| dt.date())
            .unwrap_or_else(|| {
                reference_date
                    .checked_sub_days(Days::new(7))
                    .unwrap_or(reference_date)
            });

        InductionProfile {
            train_id: train.train_id.to_string(),
            fitness_certificate_status: if train.has_active_certificate() {
                CertificateFitness::Valid
            } else {
                CertificateFitness::Expired
            },
            job_card_status: if outstanding > 0 {
                WorkloadFitness::Open
            } else {
                WorkloadFitness::Completed
            },
            branding_priority,
            mileage: train.current_odometer,
            last_cleaning_date,
            stabling_constraints: "None".to_string(),
            reliability_score,
        }
    }
}

/// Profiles for the whole fleet, in input order.
pub fn profiles(trains: &[Train], reference_date: NaiveDate) -> Vec<InductionProfile> {
    trains
        .iter()
        .map(|t| InductionProfile::from_train(t, reference_date))
        .collect()
}
