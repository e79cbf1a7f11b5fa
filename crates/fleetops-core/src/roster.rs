//! Roster filters over fetched fleet state.

use std::str::FromStr;

use crate::model::{JobCard, JobCardStatus, Train, TrainStatus};
use crate::ParseEnumError;

/// Trains currently in the given lifecycle status.
pub fn filter_by_status(trains: &[Train], status: TrainStatus) -> Vec<&Train> {
    trains.iter().filter(|t| t.status == status).collect()
}

/// Job cards for `train_id` that are still outstanding.
pub fn outstanding_job_count(cards: &[JobCard], train_id: i64) -> usize {
    cards
        .iter()
        .filter(|c| c.train_id == train_id && c.is_outstanding())
        .count()
}

/// Job cards for `train_id` that reached COMPLETED.
pub fn completed_job_count(cards: &[JobCard], train_id: i64) -> usize {
    cards
        .iter()
        .filter(|c| c.train_id == train_id && c.status == JobCardStatus::Completed)
        .count()
}

/// Trains with at least one outstanding job card.
pub fn trains_with_outstanding_jobs<'a>(
    trains: &'a [Train],
    cards: &[JobCard],
) -> Vec<&'a Train> {
    trains
        .iter()
        .filter(|t| outstanding_job_count(cards, t.train_id) > 0)
        .collect()
}

/// The four-way job-card fleet filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCardFilter {
    All,
    /// At least one outstanding card.
    Outstanding,
    /// No outstanding cards at all.
    NoneOutstanding,
    /// Has completed work and nothing outstanding.
    CompletedOnly,
}

impl FromStr for JobCardFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(JobCardFilter::All),
            "open" => Ok(JobCardFilter::Outstanding),
            "none" => Ok(JobCardFilter::NoneOutstanding),
            "completed" => Ok(JobCardFilter::CompletedOnly),
            _ => Err(ParseEnumError::new("job card filter", s)),
        }
    }
}

/// Apply a [`JobCardFilter`] to the fleet.
pub fn filter_trains<'a>(
    trains: &'a [Train],
    cards: &[JobCard],
    filter: JobCardFilter,
) -> Vec<&'a Train> {
    trains
        .iter()
        .filter(|t| {
            let outstanding = outstanding_job_count(cards, t.train_id);
            match filter {
                JobCardFilter::All => true,
                JobCardFilter::Outstanding => outstanding > 0,
                JobCardFilter::NoneOutstanding => outstanding == 0,
                JobCardFilter::CompletedOnly => {
                    outstanding == 0 && completed_job_count(cards, t.train_id) > 0
                }
            }
        })
        .collect()
}
