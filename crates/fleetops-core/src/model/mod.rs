//! Wire records for the backend JSON API.
//!
//! Field names follow the backend's camelCase JSON exactly (including the
//! capital-C `Count` envelope field). Every endpoint payload is a typed
//! record; deserialization is the validation step at the network boundary.

mod branding;
mod certificate;
mod cleaning;
mod envelope;
mod job_card;
mod train;

pub use branding::{
    AssignTrainRequest, BrandingAssignment, BrandingContract, BrandingFlag, BrandingType,
    ContractStatus, ExposureLog, ExposureReport,
};
pub use certificate::{
    Certificate, CertificateStatus, CertificateUpdate, Department, TrainCertificateStatus,
};
pub use cleaning::{CleaningStatus, CleaningTask, CleaningType};
pub use envelope::{ItemEnvelope, ListEnvelope};
pub use job_card::{JobCard, JobCardPriority, JobCardStatus, JobCardUpdate, WorkType};
pub use train::{
    CleaningDue, MaintenanceDue, MileageBalance, ServiceValidation, Train, TrainStatus,
    TrainUpdate, TripHistory,
};

use serde::{Deserialize, Serialize};

/// Direction of a KPI movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
}

/// One dashboard KPI tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub title: String,
    pub value: String,
    pub change: String,
    pub change_type: ChangeType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_value: Option<String>,
}
